//! City snapshot: building levels and sampled resource states captured from
//! the city view at one instant.

use crate::catalog::BuildingId;
use crate::resources::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// One constructed building in the city.
///
/// A city may hold several instances of the same building (two warehouses is
/// common); each appears as its own entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityBuildingInstance {
    pub building_id: BuildingId,
    pub level: u16,
}

/// Sampled state of one resource at `last_sample_timestamp_ms`.
///
/// Values are kept exactly as sampled; consumers clamp negatives where they
/// read them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResourceState {
    pub kind: Resource,
    pub current_amount: i64,
    pub max_capacity: i64,
    pub production_per_hour: f64,
    pub last_sample_timestamp_ms: i64,
}

/// Errors raised while parsing or validating a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot lists two states for one resource kind.
    #[error("snapshot lists {0} twice")]
    DuplicateKind(Resource),
    /// The snapshot JSON did not parse.
    #[error("snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the planner knows about one city at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySnapshot {
    pub city_id: String,
    #[serde(default)]
    pub building_levels: Vec<CityBuildingInstance>,
    #[serde(default)]
    pub resource_states: Vec<CityResourceState>,
}

impl CitySnapshot {
    /// Parses the camelCase JSON emitted by the city-view sampler and checks
    /// it for duplicate resource entries.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Rejects snapshots that carry two states for the same resource.
    ///
    /// Duplicate building entries are fine; duplicate resource rows mean the
    /// sampler glitched and there is no way to pick the right one.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen: BTreeSet<Resource> = BTreeSet::new();
        for state in &self.resource_states {
            if !seen.insert(state.kind) {
                return Err(SnapshotError::DuplicateKind(state.kind));
            }
        }
        Ok(())
    }

    /// Level of the named building, or 0 when the city has none.
    ///
    /// With several instances of one building the highest level wins; that is
    /// the one the reducer rules care about.
    pub fn building_level(&self, id: &BuildingId) -> u16 {
        self.building_levels
            .iter()
            .filter(|b| &b.building_id == id)
            .map(|b| b.level)
            .max()
            .unwrap_or(0)
    }

    /// Sampled state for one resource kind, if the snapshot has it.
    pub fn resource_state(&self, kind: Resource) -> Option<&CityResourceState> {
        self.resource_states.iter().find(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cityId": "polis-4711",
        "buildingLevels": [
            {"buildingId": "townHall", "level": 12},
            {"buildingId": "carpenter", "level": 6},
            {"buildingId": "warehouse", "level": 9},
            {"buildingId": "warehouse", "level": 4}
        ],
        "resourceStates": [
            {"kind": "wood", "currentAmount": 1850, "maxCapacity": 12000,
             "productionPerHour": 612.0, "lastSampleTimestampMs": 1705500000000},
            {"kind": "wine", "currentAmount": 240, "maxCapacity": 12000,
             "productionPerHour": 0.0, "lastSampleTimestampMs": 1705500000000}
        ]
    }"#;

    #[test]
    fn parses_sample_snapshot() {
        let snapshot = CitySnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.city_id, "polis-4711");
        assert_eq!(snapshot.building_levels.len(), 4);
        let wood = snapshot.resource_state(Resource::Wood).unwrap();
        assert_eq!(wood.current_amount, 1850);
        assert_eq!(wood.max_capacity, 12000);
        assert_eq!(wood.last_sample_timestamp_ms, 1_705_500_000_000);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = CitySnapshot::from_json_str(r#"{"cityId":"x"}"#).unwrap();
        assert!(snapshot.building_levels.is_empty());
        assert!(snapshot.resource_states.is_empty());
    }

    #[test]
    fn unknown_building_level_is_zero() {
        let snapshot = CitySnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.building_level(&"shipyard".into()), 0);
    }

    #[test]
    fn repeated_building_reports_highest_level() {
        let snapshot = CitySnapshot::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.building_level(&"warehouse".into()), 9);
    }

    #[test]
    fn missing_resource_state_is_none() {
        let snapshot = CitySnapshot::from_json_str(SAMPLE).unwrap();
        assert!(snapshot.resource_state(Resource::Sulfur).is_none());
    }

    #[test]
    fn duplicate_resource_kind_is_rejected() {
        let json = r#"{
            "cityId": "x",
            "resourceStates": [
                {"kind": "wood", "currentAmount": 1, "maxCapacity": 10,
                 "productionPerHour": 1.0, "lastSampleTimestampMs": 0},
                {"kind": "wood", "currentAmount": 2, "maxCapacity": 10,
                 "productionPerHour": 1.0, "lastSampleTimestampMs": 0}
            ]
        }"#;
        assert!(matches!(
            CitySnapshot::from_json_str(json).unwrap_err(),
            SnapshotError::DuplicateKind(Resource::Wood)
        ));
    }

    #[test]
    fn shipped_city_asset_parses() {
        let path =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/city.json");
        let text = std::fs::read_to_string(path).unwrap();
        let snapshot = CitySnapshot::from_json_str(&text).unwrap();
        assert!(!snapshot.city_id.is_empty());
        assert!(!snapshot.resource_states.is_empty());
    }
}
