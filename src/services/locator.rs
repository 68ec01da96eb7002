//! Location acquisition and nearby-attraction ranking
//!
//! `track_user` is the per-user unit of work the tracker fans out: fetch a
//! fresh reading, append it to the user's history, then hand the user to the
//! reward engine without waiting for it.

use crate::domain::geo::distance_miles;
use crate::domain::types::{Position, VisitedLocation};
use crate::domain::user::User;
use crate::io::{AttractionCatalog, LocationProvider};
use crate::services::rewards::RewardsService;
use anyhow::Context;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// How many ranked attractions the nearby query returns
const NEARBY_ATTRACTION_LIMIT: usize = 5;

/// One entry of the nearby-attractions ranking
#[derive(Debug, Clone, Serialize)]
pub struct NearbyAttraction {
    pub name: String,
    pub position: Position,
    pub distance_miles: f64,
    pub reward_points: i32,
}

pub struct LocationService {
    gps: Arc<dyn LocationProvider>,
    catalog: Arc<AttractionCatalog>,
    rewards: Arc<RewardsService>,
}

impl LocationService {
    pub fn new(
        gps: Arc<dyn LocationProvider>,
        catalog: Arc<AttractionCatalog>,
        rewards: Arc<RewardsService>,
    ) -> Self {
        Self { gps, catalog, rewards }
    }

    /// Refresh one user's position and trigger reward evaluation.
    ///
    /// Provider failure aborts only this user's refresh; the reward handoff
    /// is fire-and-forget.
    pub async fn track_user(&self, user: &Arc<User>) -> anyhow::Result<VisitedLocation> {
        let visited = self
            .gps
            .user_location(user.id)
            .await
            .with_context(|| format!("location provider failed for user {}", user.name))?;

        user.add_visited_location(visited.clone());
        debug!(
            user = %user.name,
            latitude = %visited.position.latitude,
            longitude = %visited.position.longitude,
            "location_recorded"
        );

        self.rewards.calculate_rewards(user.clone());
        Ok(visited)
    }

    /// Last known position if any history exists, otherwise a fresh
    /// acquisition. "Last known" means last appended.
    pub async fn user_location(&self, user: &Arc<User>) -> anyhow::Result<VisitedLocation> {
        match user.last_visited_location() {
            Some(visited) => Ok(visited),
            None => self.track_user(user).await,
        }
    }

    /// Rank the catalog by distance to `position` and return the closest
    /// five with their potential reward points. Pure read; ties keep catalog
    /// order (stable sort).
    pub async fn near_by_attractions(
        &self,
        position: Position,
        user: &User,
    ) -> anyhow::Result<Vec<NearbyAttraction>> {
        let mut ranked: Vec<(f64, usize)> = self
            .catalog
            .attractions()
            .iter()
            .enumerate()
            .map(|(i, attraction)| (distance_miles(attraction.position, position), i))
            .collect();
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut nearby = Vec::with_capacity(NEARBY_ATTRACTION_LIMIT.min(ranked.len()));
        for (distance, index) in ranked.into_iter().take(NEARBY_ATTRACTION_LIMIT) {
            let attraction = &self.catalog.attractions()[index];
            let reward_points = self.rewards.reward_points(attraction, user).await?;
            nearby.push(NearbyAttraction {
                name: attraction.name.clone(),
                position: attraction.position,
                distance_miles: distance,
                reward_points,
            });
        }
        Ok(nearby)
    }
}
