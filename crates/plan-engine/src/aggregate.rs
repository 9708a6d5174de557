//! Cost aggregation over level ranges and upgrade queues.

use crate::discount::DiscountVector;
use plan_core::{BuildingId, Catalog, ResourceVector, UpgradeQueue};

/// Total discounted cost plus how many catalog rows contributed to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregatedCost {
    pub total: ResourceVector,
    pub rows: usize,
}

/// Sums the discounted cost of every catalog row in `(current, target]`.
///
/// Each row is discounted before summing, so truncation happens per level
/// exactly as the game charges it. A target at or below the current level,
/// an unknown building, and levels without a catalog row all contribute
/// nothing; `rows` counts rows actually summed.
pub fn range_cost(
    catalog: &Catalog,
    discounts: &DiscountVector,
    building_id: &BuildingId,
    current: u16,
    target: u16,
) -> AggregatedCost {
    let mut agg = AggregatedCost::default();
    if target <= current {
        return agg;
    }
    let building = match catalog.building(building_id) {
        Some(b) => b,
        None => return agg,
    };
    for row in building.rows_between(current, target) {
        agg.total = agg.total.saturating_add(&discounts.reduce(&row.cost));
        agg.rows += 1;
    }
    agg
}

/// Prices an upgrade queue: each item adds the discounted cost of exactly
/// its target-level row, in queue order.
///
/// Items naming an unknown building or an undefined level are skipped;
/// repeated items each contribute again.
pub fn queue_cost(
    catalog: &Catalog,
    discounts: &DiscountVector,
    queue: &UpgradeQueue,
) -> AggregatedCost {
    let mut agg = AggregatedCost::default();
    for item in queue.items() {
        let row = catalog
            .building(&item.building_id)
            .and_then(|b| b.level_cost(item.target_level));
        if let Some(cost) = row {
            agg.total = agg.total.saturating_add(&discounts.reduce(cost));
            agg.rows += 1;
        }
    }
    agg
}
