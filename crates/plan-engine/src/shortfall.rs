//! Shortfall analysis: what is missing and how long until production
//! covers it.

use crate::projection::ProductionRates;
use plan_core::{Resource, ResourceVector};

/// Balance of one resource within an evaluated plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceBalance {
    pub kind: Resource,
    pub required: u64,
    pub available: u64,
    pub missing: u64,
    /// Hours of production until `missing` is covered: 0 when nothing is
    /// missing, `f64::INFINITY` when short with no production.
    pub hours_to_cover: f64,
}

impl ResourceBalance {
    /// True when the available amount covers the requirement.
    pub fn is_ready(&self) -> bool {
        self.missing == 0
    }
}

/// Per-resource balances for one evaluated plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShortfallReport {
    balances: [ResourceBalance; Resource::COUNT],
}

/// Compares required against available, per resource.
///
/// missing = max(0, required - available). The hours to cover a missing
/// amount come from the hourly rate; a short resource with no production
/// gets the `+inf` sentinel rather than an error.
pub fn assess(
    required: &ResourceVector,
    available: &ResourceVector,
    rates: &ProductionRates,
) -> ShortfallReport {
    let balances = Resource::ALL.map(|kind| {
        let required = required.get(kind);
        let available = available.get(kind);
        let missing = required.saturating_sub(available);
        let hours_to_cover = if missing == 0 {
            0.0
        } else {
            let rate = rates.get(kind);
            if rate > 0.0 {
                missing as f64 / rate
            } else {
                f64::INFINITY
            }
        };
        ResourceBalance {
            kind,
            required,
            available,
            missing,
            hours_to_cover,
        }
    });
    ShortfallReport { balances }
}

impl ShortfallReport {
    /// Balances in canonical resource order.
    pub fn balances(&self) -> &[ResourceBalance] {
        &self.balances
    }

    /// Balance of one resource kind.
    pub fn balance(&self, kind: Resource) -> &ResourceBalance {
        &self.balances[kind as usize]
    }

    /// True when at least one resource is short.
    pub fn has_missing(&self) -> bool {
        self.balances.iter().any(|b| b.missing > 0)
    }

    /// Missing amounts as a vector, ready for handing to logistics.
    pub fn missing_total(&self) -> ResourceVector {
        let mut v = ResourceVector::ZERO;
        for b in &self.balances {
            v.set(b.kind, b.missing);
        }
        v
    }

    /// Longest per-resource time to cover, in hours.
    ///
    /// Resources accumulate in parallel; readiness is governed by the
    /// slowest one, never the sum. 0 when nothing is missing, infinite
    /// when some short resource has no production.
    pub fn bottleneck_hours(&self) -> f64 {
        self.balances
            .iter()
            .map(|b| b.hours_to_cover)
            .fold(0.0, f64::max)
    }
}
