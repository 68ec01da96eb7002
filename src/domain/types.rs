//! Shared types for tourtrack

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Newtype wrapper for user IDs to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for attraction IDs to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(transparent)]
pub struct AttractionId(pub Uuid);

impl AttractionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AttractionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point on the globe in WGS84-style degrees.
///
/// No range validation is performed; callers supply valid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A timestamped position recorded for a user. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct VisitedLocation {
    pub user_id: UserId,
    pub position: Position,
    pub time: DateTime<Utc>,
}

impl VisitedLocation {
    pub fn new(user_id: UserId, position: Position, time: DateTime<Utc>) -> Self {
        Self { user_id, position, time }
    }
}

/// A named point of interest. Loaded once at startup, never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    pub position: Position,
}

impl Attraction {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: AttractionId::new(),
            name: name.into(),
            position: Position::new(latitude, longitude),
        }
    }
}

/// A one-time point award tying a user, an attraction, and the visited
/// location that triggered it. At most one exists per (user, attraction name).
#[derive(Debug, Clone, Serialize)]
pub struct UserReward {
    pub visited_location: VisitedLocation,
    pub attraction: Attraction,
    pub points: i32,
}

impl UserReward {
    pub fn new(visited_location: VisitedLocation, attraction: Attraction, points: i32) -> Self {
        Self { visited_location, attraction, points }
    }
}

/// Trip sizing preferences used by the out-of-scope pricing collaborator
#[derive(Debug, Clone, Serialize)]
pub struct UserPreferences {
    pub trip_duration: u32,
    pub ticket_quantity: u32,
    pub number_of_adults: u32,
    pub number_of_children: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self { trip_duration: 1, ticket_quantity: 1, number_of_adults: 1, number_of_children: 0 }
    }
}

/// A priced trip offer, produced and owned by the out-of-scope pricing collaborator
#[derive(Debug, Clone, Serialize)]
pub struct TripDeal {
    pub name: String,
    pub trip_id: Uuid,
    pub price: f64,
}
