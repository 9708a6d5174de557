//! Plan requests: a single current→target range or a bounded queue of
//! discrete upgrades.

use crate::catalog::BuildingId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest queue a request may carry.
pub const QUEUE_LIMIT: usize = 10;

/// One discrete upgrade: take `building_id` to exactly `target_level`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeItem {
    pub building_id: BuildingId,
    pub target_level: u16,
}

/// Errors raised while building a plan request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A queue may hold at most [`QUEUE_LIMIT`] items.
    #[error("queue holds {0} items, limit is {}", QUEUE_LIMIT)]
    QueueTooLong(usize),
}

/// Ordered upgrade queue, at most [`QUEUE_LIMIT`] items.
///
/// The bound survives deserialization: a longer JSON list fails to parse
/// instead of being silently truncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UpgradeItem>", into = "Vec<UpgradeItem>")]
pub struct UpgradeQueue(Vec<UpgradeItem>);

impl UpgradeQueue {
    /// Wraps `items`, rejecting anything over [`QUEUE_LIMIT`].
    pub fn new(items: Vec<UpgradeItem>) -> Result<Self, RequestError> {
        if items.len() > QUEUE_LIMIT {
            return Err(RequestError::QueueTooLong(items.len()));
        }
        Ok(Self(items))
    }

    /// Items in queue order.
    pub fn items(&self) -> &[UpgradeItem] {
        &self.0
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<UpgradeItem>> for UpgradeQueue {
    type Error = RequestError;

    fn try_from(items: Vec<UpgradeItem>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<UpgradeQueue> for Vec<UpgradeItem> {
    fn from(queue: UpgradeQueue) -> Self {
        queue.0
    }
}

/// What the caller wants priced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanRequest {
    /// Upgrade one building from the city's current level up to the target.
    Range(UpgradeItem),
    /// Price an ordered queue of single-level upgrades.
    Queue(UpgradeQueue),
}

impl PlanRequest {
    /// Range request for one building.
    pub fn range(building_id: impl Into<BuildingId>, target_level: u16) -> Self {
        PlanRequest::Range(UpgradeItem {
            building_id: building_id.into(),
            target_level,
        })
    }

    /// Queue request; fails when `items` is over the limit.
    pub fn queue(items: Vec<UpgradeItem>) -> Result<Self, RequestError> {
        Ok(PlanRequest::Queue(UpgradeQueue::new(items)?))
    }
}
