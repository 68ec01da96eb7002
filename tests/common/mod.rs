//! Shared test doubles for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tourtrack::domain::types::{Attraction, AttractionId, Position, UserId, VisitedLocation};
use tourtrack::domain::user::User;
use tourtrack::io::{AttractionCatalog, LocationProvider, RewardOracle};

/// Location provider that always reports the same position and counts calls
pub struct FixedGps {
    position: Position,
    pub calls: AtomicUsize,
    latency_ms: u64,
}

impl FixedGps {
    pub fn new(position: Position) -> Self {
        Self { position, calls: AtomicUsize::new(0), latency_ms: 0 }
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for FixedGps {
    async fn user_location(&self, user_id: UserId) -> anyhow::Result<VisitedLocation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }
        Ok(VisitedLocation::new(user_id, self.position, Utc::now()))
    }
}

/// Oracle that returns a fixed point value and counts calls
pub struct StubOracle {
    points: i32,
    pub calls: AtomicUsize,
    latency_ms: u64,
}

impl StubOracle {
    pub fn new(points: i32) -> Self {
        Self { points, calls: AtomicUsize::new(0), latency_ms: 0 }
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RewardOracle for StubOracle {
    async fn attraction_reward_points(
        &self,
        _attraction_id: AttractionId,
        _user_id: UserId,
    ) -> anyhow::Result<i32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }
        Ok(self.points)
    }
}

/// Oracle whose first call fails, then behaves like `StubOracle`
pub struct FlakyOracle {
    points: i32,
    failed_once: AtomicBool,
}

impl FlakyOracle {
    pub fn new(points: i32) -> Self {
        Self { points, failed_once: AtomicBool::new(false) }
    }
}

#[async_trait]
impl RewardOracle for FlakyOracle {
    async fn attraction_reward_points(
        &self,
        _attraction_id: AttractionId,
        _user_id: UserId,
    ) -> anyhow::Result<i32> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            anyhow::bail!("oracle unavailable");
        }
        Ok(self.points)
    }
}

pub fn test_user(name: &str) -> Arc<User> {
    Arc::new(User::new(name, "000", format!("{name}@tourtrack.com")))
}

/// Three-attraction catalog with well-separated positions
pub fn small_catalog() -> Arc<AttractionCatalog> {
    Arc::new(AttractionCatalog::new(vec![
        Attraction::new("Disneyland", 33.817595, -117.922008),
        Attraction::new("Flatiron Building", 40.741112, -73.989723),
        Attraction::new("McKinley Tower", 61.218887, -149.877502),
    ]))
}

/// Poll `done` every 10 ms until it holds or the timeout expires
pub async fn wait_until<F: Fn() -> bool>(done: F, timeout_ms: u64) -> bool {
    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_millis(timeout_ms);
    loop {
        if done() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }
}
