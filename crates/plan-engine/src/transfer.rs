//! Turns a plan shortfall into a shipment request for the logistics layer.

use crate::plan::{PlanResult, PlanStatus};
use plan_core::ResourceVector;
use serde::{Deserialize, Serialize};

/// A request to ship resources between two cities.
///
/// The engine only derives these; moving the goods is the shipment
/// subsystem's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_city: String,
    pub destination_city: String,
    pub resources: ResourceVector,
    pub description: String,
}

/// Derives the shipment that would cover a plan's missing resources.
///
/// The destination is the evaluated city; `source_city` is wherever the
/// caller wants to ship from. Returns None unless the plan is actually
/// missing something.
pub fn shortfall_transfer(result: &PlanResult, source_city: &str) -> Option<TransferRequest> {
    if result.status != PlanStatus::Missing {
        return None;
    }
    let resources = result.shortfall.missing_total();
    if resources.is_zero() {
        return None;
    }
    Some(TransferRequest {
        source_city: source_city.to_string(),
        destination_city: result.city_id.clone(),
        resources,
        description: format!("upgrade shortfall: {resources}"),
    })
}
