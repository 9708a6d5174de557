//! Per-resource build cost discounts derived from a city's reducer buildings.

use plan_core::{BuildingId, CitySnapshot, Resource, ResourceVector};
use std::fmt;

/// Hard cap on any single discount percentage.
pub const MAX_DISCOUNT_PCT: u8 = 50;

/// Discount percentages per resource kind, each clamped to
/// `0..=MAX_DISCOUNT_PCT`.
///
/// Every constructor clamps, so a value read back through [`get`] is always
/// a valid percentage.
///
/// [`get`]: DiscountVector::get
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiscountVector {
    pcts: [u8; Resource::COUNT],
}

impl DiscountVector {
    /// Resolves discounts from a city's building levels.
    ///
    /// Each resource kind has exactly one reducer building; the discount is
    /// that building's level, capped at [`MAX_DISCOUNT_PCT`]. A city without
    /// the building gets 0%.
    pub fn for_city(city: &CitySnapshot) -> Self {
        let mut pcts = [0u8; Resource::COUNT];
        for kind in Resource::ALL {
            let level = city.building_level(&BuildingId::from(kind.reducer_building()));
            pcts[kind as usize] = level.min(MAX_DISCOUNT_PCT as u16) as u8;
        }
        Self { pcts }
    }

    /// Same percentage for every resource, clamped to the cap.
    pub fn uniform(pct: u8) -> Self {
        Self {
            pcts: [pct.min(MAX_DISCOUNT_PCT); Resource::COUNT],
        }
    }

    /// Returns a copy with one resource's percentage replaced (clamped).
    pub fn with_pct(mut self, kind: Resource, pct: u8) -> Self {
        self.pcts[kind as usize] = pct.min(MAX_DISCOUNT_PCT);
        self
    }

    /// Discount percentage for one resource kind.
    pub fn get(&self, kind: Resource) -> u8 {
        self.pcts[kind as usize]
    }

    /// Applies the discounts to a raw cost vector.
    ///
    /// Each amount becomes floor(raw * (100 - pct) / 100); truncation, not
    /// rounding, is the required semantics since shortfall math downstream
    /// compares these totals against integer stock. The result is always
    /// componentwise <= raw.
    ///
    /// Example:
    /// let d = DiscountVector::uniform(20);
    /// let raw = ResourceVector::new(1000, 0, 0, 0, 0);
    /// assert_eq!(d.reduce(&raw).wood, 800);
    pub fn reduce(&self, raw: &ResourceVector) -> ResourceVector {
        let mut reduced = ResourceVector::ZERO;
        for (kind, amount) in raw.iter() {
            let keep = (100 - self.pcts[kind as usize] as u128) * amount as u128;
            // keep / 100 <= amount, so the cast back to u64 cannot overflow
            reduced.set(kind, (keep / 100) as u64);
        }
        reduced
    }
}

impl fmt::Display for DiscountVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in Resource::ALL {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} {}%", kind, self.pcts[kind as usize])?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::CityBuildingInstance;
    use proptest::prelude::*;

    fn city_with(levels: &[(&str, u16)]) -> CitySnapshot {
        CitySnapshot {
            city_id: "test".into(),
            building_levels: levels
                .iter()
                .map(|(id, level)| CityBuildingInstance {
                    building_id: (*id).into(),
                    level: *level,
                })
                .collect(),
            resource_states: vec![],
        }
    }

    #[test]
    fn each_kind_reads_its_own_reducer() {
        let city = city_with(&[
            ("carpenter", 6),
            ("winePress", 3),
            ("architect", 12),
            ("optician", 1),
            ("fireworker", 50),
        ]);
        let d = DiscountVector::for_city(&city);
        assert_eq!(d.get(Resource::Wood), 6);
        assert_eq!(d.get(Resource::Wine), 3);
        assert_eq!(d.get(Resource::Marble), 12);
        assert_eq!(d.get(Resource::Crystal), 1);
        assert_eq!(d.get(Resource::Sulfur), 50);
    }

    #[test]
    fn absent_reducer_means_no_discount() {
        let city = city_with(&[("townHall", 20)]);
        let d = DiscountVector::for_city(&city);
        for kind in Resource::ALL {
            assert_eq!(d.get(kind), 0);
        }
    }

    #[test]
    fn level_above_cap_clamps_to_fifty() {
        let city = city_with(&[("carpenter", 60)]);
        let d = DiscountVector::for_city(&city);
        assert_eq!(d.get(Resource::Wood), MAX_DISCOUNT_PCT);
    }

    #[test]
    fn uniform_clamps_to_cap() {
        let d = DiscountVector::uniform(80);
        for kind in Resource::ALL {
            assert_eq!(d.get(kind), MAX_DISCOUNT_PCT);
        }
    }

    #[test]
    fn with_pct_touches_one_kind_only() {
        let d = DiscountVector::default().with_pct(Resource::Marble, 30);
        assert_eq!(d.get(Resource::Marble), 30);
        assert_eq!(d.get(Resource::Wood), 0);
        assert_eq!(DiscountVector::default().with_pct(Resource::Wine, 99).get(Resource::Wine), 50);
    }

    #[test]
    fn reduce_truncates_toward_zero() {
        let d = DiscountVector::uniform(20);
        let raw = ResourceVector::new(1000, 0, 0, 0, 0);
        assert_eq!(d.reduce(&raw).wood, 800);

        // 99 at 50% is 49.5; floor, never round
        let half = DiscountVector::uniform(50);
        assert_eq!(half.reduce(&ResourceVector::new(99, 0, 0, 0, 0)).wood, 49);

        // 1 at 1% truncates all the way to 0
        let one = DiscountVector::uniform(1);
        assert_eq!(one.reduce(&ResourceVector::new(1, 0, 0, 0, 0)).wood, 0);
    }

    #[test]
    fn zero_discount_is_identity() {
        let raw = ResourceVector::new(17, 42, 0, 9999, 1);
        assert_eq!(DiscountVector::default().reduce(&raw), raw);
    }

    #[test]
    fn display_lists_all_kinds() {
        let d = DiscountVector::default().with_pct(Resource::Wood, 20);
        let line = d.to_string();
        assert!(line.contains("wood 20%"));
        assert!(line.contains("sulfur 0%"));
    }

    proptest! {
        #[test]
        fn reduce_never_exceeds_raw(
            wood in any::<u64>(),
            wine in any::<u64>(),
            marble in any::<u64>(),
            crystal in any::<u64>(),
            sulfur in any::<u64>(),
            pct in 0u8..=60,
        ) {
            let raw = ResourceVector::new(wood, wine, marble, crystal, sulfur);
            let reduced = DiscountVector::uniform(pct).reduce(&raw);
            for (kind, amount) in reduced.iter() {
                prop_assert!(amount <= raw.get(kind));
            }
        }

        #[test]
        fn deeper_discount_never_costs_more(
            amount in any::<u64>(),
            lo in 0u8..=50,
            hi in 0u8..=50,
        ) {
            let (lo, hi) = (lo.min(hi), lo.max(hi));
            let raw = ResourceVector::new(amount, 0, 0, 0, 0);
            let at_lo = DiscountVector::uniform(lo).reduce(&raw).wood;
            let at_hi = DiscountVector::uniform(hi).reduce(&raw).wood;
            prop_assert!(at_hi <= at_lo);
        }
    }
}
