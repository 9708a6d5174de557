//! Resource kinds and the fixed five-element resource vector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five resource kinds the game trades in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Wood,
    Wine,
    Marble,
    Crystal,
    Sulfur,
}

impl Resource {
    /// All kinds, in canonical order.
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Wine,
        Resource::Marble,
        Resource::Crystal,
        Resource::Sulfur,
    ];

    /// Number of resource kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Lowercase name as used on the wire and in output.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Wood => "wood",
            Resource::Wine => "wine",
            Resource::Marble => "marble",
            Resource::Crystal => "crystal",
            Resource::Sulfur => "sulfur",
        }
    }

    /// Id of the building whose level grants this resource's cost discount.
    ///
    /// Each kind has exactly one reducer building; the table is fixed by the
    /// game rules.
    pub fn reducer_building(self) -> &'static str {
        match self {
            Resource::Wood => "carpenter",
            Resource::Wine => "winePress",
            Resource::Marble => "architect",
            Resource::Crystal => "optician",
            Resource::Sulfur => "fireworker",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Amounts of all five resources.
///
/// Every kind is always present; JSON objects may omit keys, which read as
/// zero. Amounts are non-negative by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceVector {
    #[serde(default)]
    pub wood: u64,
    #[serde(default)]
    pub wine: u64,
    #[serde(default)]
    pub marble: u64,
    #[serde(default)]
    pub crystal: u64,
    #[serde(default)]
    pub sulfur: u64,
}

impl ResourceVector {
    /// The all-zero vector.
    pub const ZERO: ResourceVector = ResourceVector {
        wood: 0,
        wine: 0,
        marble: 0,
        crystal: 0,
        sulfur: 0,
    };

    /// Builds a vector from amounts in canonical order.
    pub fn new(wood: u64, wine: u64, marble: u64, crystal: u64, sulfur: u64) -> Self {
        Self {
            wood,
            wine,
            marble,
            crystal,
            sulfur,
        }
    }

    /// Amount of a single kind.
    pub fn get(&self, kind: Resource) -> u64 {
        match kind {
            Resource::Wood => self.wood,
            Resource::Wine => self.wine,
            Resource::Marble => self.marble,
            Resource::Crystal => self.crystal,
            Resource::Sulfur => self.sulfur,
        }
    }

    /// Replaces the amount of a single kind.
    pub fn set(&mut self, kind: Resource, amount: u64) {
        match kind {
            Resource::Wood => self.wood = amount,
            Resource::Wine => self.wine = amount,
            Resource::Marble => self.marble = amount,
            Resource::Crystal => self.crystal = amount,
            Resource::Sulfur => self.sulfur = amount,
        }
    }

    /// Kind/amount pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u64)> + '_ {
        Resource::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Component-wise saturating sum.
    pub fn saturating_add(&self, other: &ResourceVector) -> ResourceVector {
        ResourceVector {
            wood: self.wood.saturating_add(other.wood),
            wine: self.wine.saturating_add(other.wine),
            marble: self.marble.saturating_add(other.marble),
            crystal: self.crystal.saturating_add(other.crystal),
            sulfur: self.sulfur.saturating_add(other.sulfur),
        }
    }

    /// True when every amount is zero.
    pub fn is_zero(&self) -> bool {
        Resource::ALL.iter().all(|&kind| self.get(kind) == 0)
    }
}

impl fmt::Display for ResourceVector {
    /// Renders nonzero amounts as `wood 100, wine 20`, or `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("none");
        }
        let mut first = true;
        for (kind, amount) in self.iter() {
            if amount == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind} {amount}")?;
            first = false;
        }
        Ok(())
    }
}
