//! Building cost catalog: immutable level→cost tables, loaded once at startup
//! and passed by reference to every engine call.

use crate::resources::ResourceVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Building identifier as used on the game pages, e.g. "townHall".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub String);

impl BuildingId {
    /// Borrowed id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BuildingId {
    fn from(id: &str) -> Self {
        BuildingId(id.to_string())
    }
}

impl From<String> for BuildingId {
    fn from(id: String) -> Self {
        BuildingId(id)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Cost of reaching one specific level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCost {
    pub level: u16,
    pub cost: ResourceVector,
}

/// One building's cost table, ordered by strictly increasing level.
///
/// Levels may have gaps; a missing row simply contributes nothing when a
/// range over it is summed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDefinition {
    pub building_id: BuildingId,
    pub display_name: String,
    pub levels: Vec<LevelCost>,
}

impl BuildingDefinition {
    /// Cost row for exactly `level`, if one is defined.
    pub fn level_cost(&self, level: u16) -> Option<&ResourceVector> {
        self.levels
            .iter()
            .find(|row| row.level == level)
            .map(|row| &row.cost)
    }

    /// Rows with level in the half-open range `(current, target]`.
    pub fn rows_between(
        &self,
        current: u16,
        target: u16,
    ) -> impl Iterator<Item = &LevelCost> + '_ {
        self.levels
            .iter()
            .filter(move |row| row.level > current && row.level <= target)
    }

    /// Highest defined level, or 0 for an empty table.
    pub fn max_level(&self) -> u16 {
        self.levels.last().map(|row| row.level).unwrap_or(0)
    }
}

/// Errors raised while constructing or parsing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two definitions share one building id.
    #[error("duplicate building id: {0}")]
    DuplicateBuilding(BuildingId),
    /// Cost rows start at level 1; level 0 is the empty plot.
    #[error("building {0} has a cost row for level 0")]
    ZeroLevel(BuildingId),
    /// Level order must be strictly increasing within a building.
    #[error("building {building} levels out of order: {level} after {previous}")]
    UnsortedLevels {
        building: BuildingId,
        level: u16,
        previous: u16,
    },
    /// The catalog JSON did not parse.
    #[error("catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable building cost catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    buildings: Vec<BuildingDefinition>,
}

impl Catalog {
    /// Validates and freezes a set of building definitions.
    pub fn new(buildings: Vec<BuildingDefinition>) -> Result<Self, CatalogError> {
        let mut seen: BTreeSet<&BuildingId> = BTreeSet::new();
        for building in &buildings {
            if !seen.insert(&building.building_id) {
                return Err(CatalogError::DuplicateBuilding(building.building_id.clone()));
            }
            let mut previous = 0u16;
            for row in &building.levels {
                if row.level == 0 {
                    return Err(CatalogError::ZeroLevel(building.building_id.clone()));
                }
                if row.level <= previous {
                    return Err(CatalogError::UnsortedLevels {
                        building: building.building_id.clone(),
                        level: row.level,
                        previous,
                    });
                }
                previous = row.level;
            }
        }
        Ok(Self { buildings })
    }

    /// Parses the camelCase JSON list produced by the catalog export.
    ///
    /// Negative cost values clamp to zero; an empty display name falls back
    /// to the building id.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawBuilding> = serde_json::from_str(json)?;
        Self::new(raw.into_iter().map(RawBuilding::into_definition).collect())
    }

    /// Looks up a building by id.
    pub fn building(&self, id: &BuildingId) -> Option<&BuildingDefinition> {
        self.buildings.iter().find(|b| &b.building_id == id)
    }

    /// All definitions, in catalog order.
    pub fn buildings(&self) -> &[BuildingDefinition] {
        &self.buildings
    }

    /// Number of buildings in the catalog.
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// True when the catalog defines no buildings.
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuilding {
    building_id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    levels: Vec<RawLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel {
    level: u16,
    #[serde(default)]
    cost: RawCost,
}

#[derive(Debug, Default, Deserialize)]
struct RawCost {
    #[serde(default)]
    wood: i64,
    #[serde(default)]
    wine: i64,
    #[serde(default)]
    marble: i64,
    #[serde(default)]
    crystal: i64,
    #[serde(default)]
    sulfur: i64,
}

impl RawBuilding {
    fn into_definition(self) -> BuildingDefinition {
        let display_name = if self.display_name.is_empty() {
            self.building_id.clone()
        } else {
            self.display_name
        };
        BuildingDefinition {
            building_id: BuildingId(self.building_id),
            display_name,
            levels: self
                .levels
                .into_iter()
                .map(|row| LevelCost {
                    level: row.level,
                    cost: row.cost.clamped(),
                })
                .collect(),
        }
    }
}

impl RawCost {
    fn clamped(self) -> ResourceVector {
        fn nn(v: i64) -> u64 {
            v.max(0) as u64
        }
        ResourceVector::new(
            nn(self.wood),
            nn(self.wine),
            nn(self.marble),
            nn(self.crystal),
            nn(self.sulfur),
        )
    }
}
