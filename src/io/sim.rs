//! Simulated external providers and user seeding
//!
//! Stand-ins for the real GPS feed and reward oracle: random positions and
//! point values behind the same trait seams, with configurable artificial
//! latency to exercise the concurrent paths realistically.

use crate::domain::types::{AttractionId, Position, UserId, VisitedLocation};
use crate::domain::user::User;
use crate::io::{LocationProvider, RewardOracle};
use crate::services::registry::UserRegistry;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Latitude bound used for random positions (web-mercator clamp)
const MAX_LATITUDE: f64 = 85.05112878;

fn random_position() -> Position {
    let mut rng = rand::rng();
    Position::new(
        rng.random_range(-MAX_LATITUDE..=MAX_LATITUDE),
        rng.random_range(-180.0..=180.0),
    )
}

/// GPS provider returning a random position per request
pub struct SimulatedGps {
    latency_ms: u64,
}

impl SimulatedGps {
    pub fn new(latency_ms: u64) -> Self {
        Self { latency_ms }
    }
}

#[async_trait]
impl LocationProvider for SimulatedGps {
    async fn user_location(&self, user_id: UserId) -> anyhow::Result<VisitedLocation> {
        if self.latency_ms > 0 {
            sleep(Duration::from_millis(self.latency_ms)).await;
        }
        Ok(VisitedLocation::new(user_id, random_position(), Utc::now()))
    }
}

/// Reward oracle returning a random point value per request
pub struct SimulatedRewardCentral {
    latency_ms: u64,
}

impl SimulatedRewardCentral {
    pub fn new(latency_ms: u64) -> Self {
        Self { latency_ms }
    }
}

#[async_trait]
impl RewardOracle for SimulatedRewardCentral {
    async fn attraction_reward_points(
        &self,
        _attraction_id: AttractionId,
        _user_id: UserId,
    ) -> anyhow::Result<i32> {
        if self.latency_ms > 0 {
            sleep(Duration::from_millis(self.latency_ms)).await;
        }
        Ok(rand::rng().random_range(1..=1000))
    }
}

/// Populate the registry with `count` internal users, each carrying a short
/// random location history
pub fn seed_users(registry: &UserRegistry, count: usize) {
    for i in 0..count {
        let name = format!("internalUser{i}");
        let email = format!("{name}@tourtrack.com");
        let user = User::new(name, "000", email);
        seed_location_history(&user);
        registry.add_user(Arc::new(user));
    }
    debug!(user_count = count, "internal_users_seeded");
}

fn seed_location_history(user: &User) {
    let mut rng = rand::rng();
    for _ in 0..3 {
        let time = Utc::now() - ChronoDuration::days(rng.random_range(0..30));
        user.add_visited_location(VisitedLocation::new(user.id, random_position(), time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_position_in_range() {
        for _ in 0..100 {
            let p = random_position();
            assert!(p.latitude.abs() <= MAX_LATITUDE);
            assert!(p.longitude.abs() <= 180.0);
        }
    }

    #[test]
    fn test_seed_users_populates_registry_with_history() {
        let registry = UserRegistry::new();
        seed_users(&registry, 10);
        assert_eq!(registry.len(), 10);
        let user = registry.get_user("internalUser0").unwrap();
        assert_eq!(user.visited_locations().len(), 3);
    }

    #[tokio::test]
    async fn test_simulated_gps_returns_reading_for_user() {
        let gps = SimulatedGps::new(0);
        let user_id = UserId::new();
        let visited = gps.user_location(user_id).await.unwrap();
        assert_eq!(visited.user_id, user_id);
    }
}
