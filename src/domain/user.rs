//! Per-user mutable state
//!
//! A `User` lives for the process lifetime and is mutated concurrently by the
//! location-acquisition path (appending visited locations) and the reward
//! engine (appending rewards). Both sequences are copy-on-append: readers get
//! snapshots, writers never block readers mid-iteration.

use crate::domain::cow_list::CowList;
use crate::domain::types::{TripDeal, UserId, UserPreferences, UserReward, VisitedLocation};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone_number: String,
    pub email_address: String,
    visited_locations: CowList<VisitedLocation>,
    rewards: CowList<UserReward>,
    preferences: RwLock<UserPreferences>,
    trip_deals: RwLock<Vec<TripDeal>>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            phone_number: phone_number.into(),
            email_address: email_address.into(),
            visited_locations: CowList::new(),
            rewards: CowList::new(),
            preferences: RwLock::new(UserPreferences::default()),
            trip_deals: RwLock::new(Vec::new()),
        }
    }

    pub fn add_visited_location(&self, visited: VisitedLocation) {
        self.visited_locations.push(visited);
    }

    /// Snapshot of the full location history, oldest first
    pub fn visited_locations(&self) -> Arc<Vec<VisitedLocation>> {
        self.visited_locations.snapshot()
    }

    /// Most recent entry is "last appended", not latest timestamp
    pub fn last_visited_location(&self) -> Option<VisitedLocation> {
        self.visited_locations.last()
    }

    /// Record a reward unless one already exists for the same attraction name.
    ///
    /// The absence check and the append run under one lock, so racing reward
    /// evaluations cannot both record the same attraction. Returns whether
    /// the reward was recorded.
    pub fn add_reward(&self, reward: UserReward) -> bool {
        let name = reward.attraction.name.clone();
        self.rewards.push_if(reward, |rewards| {
            rewards.iter().all(|r| r.attraction.name != name)
        })
    }

    /// Cheap pre-check used before any distance or oracle work
    pub fn has_reward_for(&self, attraction_name: &str) -> bool {
        self.rewards.snapshot().iter().any(|r| r.attraction.name == attraction_name)
    }

    pub fn rewards(&self) -> Arc<Vec<UserReward>> {
        self.rewards.snapshot()
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences.read().clone()
    }

    pub fn set_preferences(&self, preferences: UserPreferences) {
        *self.preferences.write() = preferences;
    }

    pub fn trip_deals(&self) -> Vec<TripDeal> {
        self.trip_deals.read().clone()
    }

    pub fn set_trip_deals(&self, deals: Vec<TripDeal>) {
        *self.trip_deals.write() = deals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Attraction, Position};
    use chrono::Utc;

    fn visit(user: &User, lat: f64, lon: f64) -> VisitedLocation {
        VisitedLocation::new(user.id, Position::new(lat, lon), Utc::now())
    }

    #[test]
    fn test_last_visited_is_last_appended() {
        let user = User::new("jon", "000", "jon@tourtrack.com");
        assert!(user.last_visited_location().is_none());

        // Deliberately append an older timestamp last; "most recent" still
        // means last appended.
        let mut first = visit(&user, 1.0, 1.0);
        first.time = Utc::now();
        let mut second = visit(&user, 2.0, 2.0);
        second.time = first.time - chrono::Duration::days(1);

        user.add_visited_location(first);
        user.add_visited_location(second.clone());

        let last = user.last_visited_location().unwrap();
        assert_eq!(last.position, second.position);
        assert_eq!(user.visited_locations().len(), 2);
    }

    #[test]
    fn test_add_reward_dedups_by_attraction_name() {
        let user = User::new("jon", "000", "jon@tourtrack.com");
        let attraction = Attraction::new("Disneyland", 33.817595, -117.922008);
        let visited = visit(&user, 33.817595, -117.922008);

        assert!(user.add_reward(UserReward::new(visited.clone(), attraction.clone(), 100)));
        assert!(!user.add_reward(UserReward::new(visited, attraction, 250)));

        let rewards = user.rewards();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].points, 100);
        assert!(user.has_reward_for("Disneyland"));
        assert!(!user.has_reward_for("Jackson Hole"));
    }
}
