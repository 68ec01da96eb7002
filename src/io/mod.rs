//! External collaborator seams: location provider, reward oracle, catalog

pub mod catalog;
pub mod sim;

use crate::domain::types::{AttractionId, UserId, VisitedLocation};
use async_trait::async_trait;

pub use catalog::AttractionCatalog;
pub use sim::{SimulatedGps, SimulatedRewardCentral};

/// Source of current position readings.
///
/// Calls are blocking from the provider's point of view and may be slow;
/// callers run them on their own tasks. Failure aborts only the requesting
/// user's refresh.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn user_location(&self, user_id: UserId) -> anyhow::Result<VisitedLocation>;
}

/// External scoring oracle for attraction reward points. Blocking, costly;
/// the reward engine dedups before ever calling it.
#[async_trait]
pub trait RewardOracle: Send + Sync {
    async fn attraction_reward_points(
        &self,
        attraction_id: AttractionId,
        user_id: UserId,
    ) -> anyhow::Result<i32>;
}
