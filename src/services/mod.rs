//! Business logic: user registry, location acquisition, rewards, tracking

pub mod locator;
pub mod registry;
pub mod rewards;
pub mod tracker;

pub use locator::{LocationService, NearbyAttraction};
pub use registry::UserRegistry;
pub use rewards::{create_rewards_engine, RewardWorker, RewardsService};
pub use tracker::{Tracker, TrackerHandle};
