//! Plan evaluation: composes discounts, pricing, projection and shortfall
//! analysis into one result.

use crate::aggregate;
use crate::discount::DiscountVector;
use crate::projection::{self, ProductionRates, MS_PER_HOUR};
use crate::shortfall::{self, ShortfallReport};
use plan_core::{Catalog, CitySnapshot, PlanRequest, ResourceVector};
use std::fmt;

/// Tri-state outcome of one evaluation pass.
///
/// Terminal per call; evaluating again with a newer snapshot or `now` may
/// classify differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanStatus {
    /// The target is already met; nothing to build.
    Completed,
    /// Every required resource is covered right now.
    Ready,
    /// At least one resource is short.
    Missing,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanStatus::Completed => "completed",
            PlanStatus::Ready => "ready",
            PlanStatus::Missing => "missing",
        };
        f.pad(s)
    }
}

/// Everything known about one evaluated plan.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanResult {
    pub city_id: String,
    pub status: PlanStatus,
    /// Catalog rows that were actually priced.
    pub rows: usize,
    /// Total discounted cost of the request.
    pub required: ResourceVector,
    /// The `now` the projection used, epoch milliseconds.
    pub evaluated_at_ms: i64,
    pub shortfall: ShortfallReport,
}

impl PlanResult {
    /// Longest per-resource wait, in hours. See
    /// [`ShortfallReport::bottleneck_hours`].
    pub fn bottleneck_hours(&self) -> f64 {
        self.shortfall.bottleneck_hours()
    }

    /// Epoch milliseconds when production covers every shortfall.
    ///
    /// None unless the plan is missing resources with a finite wait.
    pub fn eta_ms(&self) -> Option<i64> {
        if self.status != PlanStatus::Missing {
            return None;
        }
        let hours = self.bottleneck_hours();
        if !hours.is_finite() {
            return None;
        }
        let wait_ms = (hours * MS_PER_HOUR).ceil() as i64;
        Some(self.evaluated_at_ms.saturating_add(wait_ms))
    }
}

impl fmt::Display for PlanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plan for {}: {}, {} row(s) priced",
            self.city_id, self.status, self.rows
        )?;
        if self.required.is_zero() {
            return write!(f, "\n  nothing required");
        }
        for b in self.shortfall.balances() {
            if b.required == 0 {
                continue;
            }
            write!(
                f,
                "\n  {:<8} required {:>9}  available {:>9}  missing {:>9}",
                b.kind, b.required, b.available, b.missing
            )?;
            if b.missing > 0 {
                if b.hours_to_cover.is_finite() {
                    write!(f, "  ~{:.1}h", b.hours_to_cover)?;
                } else {
                    write!(f, "  no production")?;
                }
            }
        }
        if self.status == PlanStatus::Missing {
            let hours = self.bottleneck_hours();
            if hours.is_finite() {
                write!(f, "\n  bottleneck: {hours:.1} hours")?;
            } else {
                write!(f, "\n  bottleneck: never at current production")?;
            }
        }
        Ok(())
    }
}

/// Evaluates one plan request against a city at `now_ms`.
///
/// Pure composition over immutable inputs: resolve the city's discounts,
/// price the request, project stock to `now_ms`, classify. Never fails;
/// every degenerate input prices as zero or clamps.
pub fn evaluate(
    catalog: &Catalog,
    city: &CitySnapshot,
    request: &PlanRequest,
    now_ms: i64,
) -> PlanResult {
    let discounts = DiscountVector::for_city(city);
    let (cost, completed) = match request {
        PlanRequest::Range(item) => {
            let current = city.building_level(&item.building_id);
            let cost = aggregate::range_cost(
                catalog,
                &discounts,
                &item.building_id,
                current,
                item.target_level,
            );
            (cost, item.target_level <= current)
        }
        PlanRequest::Queue(queue) => (
            aggregate::queue_cost(catalog, &discounts, queue),
            queue.is_empty(),
        ),
    };
    let available = projection::available_at(city, now_ms);
    let rates = ProductionRates::for_city(city);
    let report = shortfall::assess(&cost.total, &available, &rates);
    let status = if completed {
        PlanStatus::Completed
    } else if report.has_missing() {
        PlanStatus::Missing
    } else {
        PlanStatus::Ready
    };
    tracing::debug!(
        city = %city.city_id,
        status = %status,
        rows = cost.rows,
        "evaluated upgrade plan"
    );
    PlanResult {
        city_id: city.city_id.clone(),
        status,
        rows: cost.rows,
        required: cost.total,
        evaluated_at_ms: now_ms,
        shortfall: report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{CityBuildingInstance, CityResourceState, Resource, UpgradeItem};

    const HOUR_MS: i64 = 3_600_000;
    const NOW_MS: i64 = 1_705_500_000_000;

    const CATALOG: &str = r#"[
        {"buildingId":"townHall","displayName":"Town Hall","levels":[
            {"level":13,"cost":{"wood":1912,"marble":478}},
            {"level":14,"cost":{"wood":2071,"marble":913}}
        ]},
        {"buildingId":"carpenter","displayName":"Carpenter","levels":[
            {"level":1,"cost":{"wood":63}}
        ]}
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json_str(CATALOG).unwrap()
    }

    fn building(id: &str, level: u16) -> CityBuildingInstance {
        CityBuildingInstance {
            building_id: id.into(),
            level,
        }
    }

    fn sampled(kind: Resource, current: i64, per_hour: f64) -> CityResourceState {
        CityResourceState {
            kind,
            current_amount: current,
            max_capacity: 1_000_000,
            production_per_hour: per_hour,
            last_sample_timestamp_ms: NOW_MS,
        }
    }

    fn sample_city() -> CitySnapshot {
        CitySnapshot {
            city_id: "polis-4711".into(),
            building_levels: vec![building("townHall", 12), building("carpenter", 6)],
            resource_states: vec![
                sampled(Resource::Wood, 1850, 612.0),
                sampled(Resource::Marble, 100, 200.0),
            ],
        }
    }

    #[test]
    fn reached_target_is_completed() {
        let result = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 12), NOW_MS);
        assert_eq!(result.status, PlanStatus::Completed);
        assert!(result.required.is_zero());
        assert_eq!(result.rows, 0);
        assert_eq!(result.eta_ms(), None);
    }

    #[test]
    fn range_prices_with_city_discounts() {
        let result = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 14), NOW_MS);
        // carpenter 6 takes 6% off wood per row: floor(1912*0.94) + floor(2071*0.94)
        assert_eq!(result.required.wood, 1797 + 1946);
        // no architect, marble stays raw
        assert_eq!(result.required.marble, 478 + 913);
        assert_eq!(result.rows, 2);
        assert_eq!(result.status, PlanStatus::Missing);
    }

    #[test]
    fn missing_plan_reports_finite_eta() {
        let result = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 14), NOW_MS);
        // marble is the slowest: (1391 - 100) / 200 per hour
        let wood_wait = (3743.0 - 1850.0) / 612.0;
        let marble_wait = (1391.0 - 100.0) / 200.0;
        assert!(marble_wait > wood_wait);
        assert!((result.bottleneck_hours() - marble_wait).abs() < 1e-9);
        let eta = result.eta_ms().unwrap();
        let expected = NOW_MS + (marble_wait * MS_PER_HOUR) as i64;
        assert!((eta - expected).abs() <= 1);
    }

    #[test]
    fn projection_can_turn_missing_into_ready() {
        let mut city = sample_city();
        city.building_levels.clear();
        // 40 in stock, 63 needed, 100/h incoming
        city.resource_states = vec![sampled(Resource::Wood, 40, 100.0)];
        let request = PlanRequest::queue(vec![UpgradeItem {
            building_id: "carpenter".into(),
            target_level: 1,
        }])
        .unwrap();
        let early = evaluate(&catalog(), &city, &request, NOW_MS);
        assert_eq!(early.status, PlanStatus::Missing);
        let later = evaluate(&catalog(), &city, &request, NOW_MS + HOUR_MS);
        assert_eq!(later.status, PlanStatus::Ready);
        assert_eq!(later.evaluated_at_ms, NOW_MS + HOUR_MS);
    }

    #[test]
    fn empty_queue_is_completed() {
        let request = PlanRequest::queue(vec![]).unwrap();
        let result = evaluate(&catalog(), &sample_city(), &request, NOW_MS);
        assert_eq!(result.status, PlanStatus::Completed);
        assert_eq!(result.rows, 0);
    }

    #[test]
    fn unknown_building_is_free_and_ready() {
        let result = evaluate(&catalog(), &sample_city(), &PlanRequest::range("shipyard", 5), NOW_MS);
        assert_eq!(result.status, PlanStatus::Ready);
        assert!(result.required.is_zero());
        assert_eq!(result.rows, 0);
    }

    #[test]
    fn reducer_building_lowers_the_bill() {
        let with_carpenter = evaluate(
            &catalog(),
            &sample_city(),
            &PlanRequest::range("townHall", 14),
            NOW_MS,
        );
        let mut bare = sample_city();
        bare.building_levels.retain(|b| b.building_id.as_str() != "carpenter");
        let without = evaluate(&catalog(), &bare, &PlanRequest::range("townHall", 14), NOW_MS);
        assert_eq!(without.required.wood, 1912 + 2071);
        assert!(with_carpenter.required.wood < without.required.wood);
        assert_eq!(with_carpenter.required.marble, without.required.marble);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let a = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 14), NOW_MS);
        let b = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 14), NOW_MS);
        assert_eq!(a, b);
    }

    #[test]
    fn display_summarizes_the_shortfall() {
        let result = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 14), NOW_MS);
        let text = result.to_string();
        assert!(text.contains("plan for polis-4711: missing"));
        assert!(text.contains("wood"));
        assert!(text.contains("bottleneck:"));

        let done = evaluate(&catalog(), &sample_city(), &PlanRequest::range("townHall", 12), NOW_MS);
        assert!(done.to_string().contains("nothing required"));
    }
}
