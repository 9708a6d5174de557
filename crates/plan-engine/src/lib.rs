#![deny(warnings)]

//! Upgrade planning engine for a multi-city building game.
//!
//! This crate provides the deterministic, side-effect-free computations
//! behind an upgrade plan:
//! - Per-city cost discounts from reducer buildings
//! - Resource projection from a timestamped snapshot
//! - Cost aggregation over level ranges and upgrade queues
//! - Shortfall and time-to-sufficiency analysis
//!
//! All inputs are borrowed immutably; every function returns a fresh value
//! and keeps no state between calls.

pub mod aggregate;
pub mod discount;
pub mod plan;
pub mod projection;
pub mod shortfall;
pub mod transfer;

pub use aggregate::{queue_cost, range_cost, AggregatedCost};
pub use discount::{DiscountVector, MAX_DISCOUNT_PCT};
pub use plan::{evaluate, PlanResult, PlanStatus};
pub use projection::{available_at, projected_amount, ProductionRates, MS_PER_HOUR};
pub use shortfall::{assess, ResourceBalance, ShortfallReport};
pub use transfer::{shortfall_transfer, TransferRequest};
