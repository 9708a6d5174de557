#![deny(warnings)]

//! Core domain model for the upgrade planner.
//!
//! This crate defines the serializable types shared across the workspace:
//! resource vectors, the building cost catalog, city snapshots, and plan
//! requests. Boundary validation here guarantees the invariants the engine
//! relies on.

pub mod catalog;
pub mod city;
pub mod request;
pub mod resources;

pub use catalog::{BuildingDefinition, BuildingId, Catalog, CatalogError, LevelCost};
pub use city::{CityBuildingInstance, CityResourceState, CitySnapshot, SnapshotError};
pub use request::{PlanRequest, RequestError, UpgradeItem, UpgradeQueue, QUEUE_LIMIT};
pub use resources::{Resource, ResourceVector};
