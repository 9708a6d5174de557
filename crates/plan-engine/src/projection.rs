//! Time extrapolation of sampled resource amounts.

use plan_core::{CityResourceState, CitySnapshot, Resource, ResourceVector};

/// Milliseconds per hour, the projection time base.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

fn sanitize_rate(per_hour: f64) -> f64 {
    if per_hour.is_finite() && per_hour > 0.0 {
        per_hour
    } else {
        0.0
    }
}

/// Extrapolates one resource's amount to `now_ms`, capped at capacity.
///
/// elapsed = max(0, now - sample time), so a `now` before the sample (clock
/// skew between the game server and the caller) reads back the sampled
/// amount instead of draining it. Negative sampled amounts and capacities
/// clamp to zero; negative or non-finite rates count as no production.
/// The result floors fractional progress.
///
/// Example:
/// let projected = projected_amount(&state, state.last_sample_timestamp_ms);
/// assert_eq!(projected, state.current_amount.max(0) as u64);
pub fn projected_amount(state: &CityResourceState, now_ms: i64) -> u64 {
    let capacity = state.max_capacity.max(0) as u64;
    let current = state.current_amount.max(0) as f64;
    let rate = sanitize_rate(state.production_per_hour);
    let elapsed_ms = now_ms.saturating_sub(state.last_sample_timestamp_ms).max(0) as f64;
    let produced = rate * elapsed_ms / MS_PER_HOUR;
    // float->int casts saturate, so absurd elapsed times cap cleanly
    let projected = (current + produced).floor() as u64;
    projected.min(capacity)
}

/// Projects every sampled resource to `now_ms`.
///
/// Kinds the snapshot has no state for read as zero.
pub fn available_at(city: &CitySnapshot, now_ms: i64) -> ResourceVector {
    let mut available = ResourceVector::ZERO;
    for kind in Resource::ALL {
        if let Some(state) = city.resource_state(kind) {
            available.set(kind, projected_amount(state, now_ms));
        }
    }
    available
}

/// Hourly production per resource kind, clamped non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProductionRates {
    per_hour: [f64; Resource::COUNT],
}

impl ProductionRates {
    /// Rates from a snapshot; kinds without a sampled state produce nothing.
    pub fn for_city(city: &CitySnapshot) -> Self {
        let mut per_hour = [0.0; Resource::COUNT];
        for kind in Resource::ALL {
            if let Some(state) = city.resource_state(kind) {
                per_hour[kind as usize] = sanitize_rate(state.production_per_hour);
            }
        }
        Self { per_hour }
    }

    /// Returns a copy with one kind's rate replaced; negatives and
    /// non-finite values read as zero.
    pub fn with_rate(mut self, kind: Resource, per_hour: f64) -> Self {
        self.per_hour[kind as usize] = sanitize_rate(per_hour);
        self
    }

    /// Hourly rate for one kind.
    pub fn get(&self, kind: Resource) -> f64 {
        self.per_hour[kind as usize]
    }
}
