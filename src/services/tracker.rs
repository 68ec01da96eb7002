//! Periodic tracking scheduler
//!
//! Each cycle fans out one location-acquisition task per known user, waits
//! for the whole batch, then sleeps. Shutdown is observed at the start of
//! each cycle and before the sleep; dispatched tasks run to completion.

use crate::services::locator::LocationService;
use crate::services::registry::UserRegistry;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Lifecycle handle for a spawned tracker
pub struct TrackerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Request an orderly stop: no new cycle starts, in-flight acquisitions
    /// run to completion
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the tracking loop to exit
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

pub struct Tracker {
    locator: Arc<LocationService>,
    registry: Arc<UserRegistry>,
    interval: Duration,
}

impl Tracker {
    pub fn new(
        locator: Arc<LocationService>,
        registry: Arc<UserRegistry>,
        interval: Duration,
    ) -> Self {
        Self { locator, registry, interval }
    }

    /// Spawn the tracking loop and return a handle controlling its lifetime
    pub fn start(self) -> TrackerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { self.run(shutdown_rx).await });
        TrackerHandle { shutdown_tx, task }
    }

    /// Run tracking cycles until the shutdown signal flips to true.
    ///
    /// An overrunning cycle is followed immediately by the sleep and the next
    /// cycle; there is no catch-up of missed intervals.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "tracker_started");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let users = self.registry.users();
            debug!(user_count = users.len(), "tracker_cycle_begin");
            let cycle_start = Instant::now();

            // One task per user; a failed acquisition never aborts the batch.
            let mut batch = JoinSet::new();
            for user in users {
                let locator = self.locator.clone();
                batch.spawn(async move {
                    if let Err(e) = locator.track_user(&user).await {
                        warn!(user = %user.name, error = %e, "track_user_failed");
                    }
                });
            }
            while batch.join_next().await.is_some() {}

            info!(
                elapsed_ms = cycle_start.elapsed().as_millis() as u64,
                "tracker_cycle_complete"
            );

            if *shutdown_rx.borrow() {
                break;
            }
            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("tracker_stopped");
    }
}
