//! Reward engine: proximity matching, dedup, oracle scoring
//!
//! `calculate_rewards` is a fire-and-forget enqueue; dedicated worker tasks
//! consume the queue and run evaluations concurrently under a semaphore, so
//! slow oracle calls never serialize users or block the acquisition path.

use crate::domain::geo::distance_miles;
use crate::domain::types::{Attraction, Position, UserReward, VisitedLocation};
use crate::domain::user::User;
use crate::infra::config::Config;
use crate::io::{AttractionCatalog, RewardOracle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// A reward evaluation request for one user
pub struct RewardJob {
    pub user: Arc<User>,
    /// When the job was enqueued (for queue delay measurement)
    pub enqueued_at: Instant,
}

pub struct RewardsService {
    catalog: Arc<AttractionCatalog>,
    oracle: Arc<dyn RewardOracle>,
    /// Reward eligibility threshold in statute miles, stored as f64 bits so
    /// it can be adjusted at runtime without a lock
    proximity_buffer_bits: AtomicU64,
    default_proximity_buffer_miles: f64,
    /// Separate, larger "is within attraction proximity" threshold. Kept as
    /// its own constant; it is not the reward buffer.
    attraction_proximity_miles: f64,
    job_tx: mpsc::Sender<RewardJob>,
}

impl RewardsService {
    pub fn new(
        catalog: Arc<AttractionCatalog>,
        oracle: Arc<dyn RewardOracle>,
        config: &Config,
        job_tx: mpsc::Sender<RewardJob>,
    ) -> Self {
        Self {
            catalog,
            oracle,
            proximity_buffer_bits: AtomicU64::new(config.proximity_buffer_miles().to_bits()),
            default_proximity_buffer_miles: config.proximity_buffer_miles(),
            attraction_proximity_miles: config.attraction_proximity_miles(),
            job_tx,
        }
    }

    /// Trigger reward evaluation for a user without waiting for it.
    ///
    /// A full queue drops the job with a warning; the next tracking cycle
    /// re-enqueues the user, so nothing is lost permanently.
    pub fn calculate_rewards(&self, user: Arc<User>) {
        let job = RewardJob { user, enqueued_at: Instant::now() };
        if let Err(e) = self.job_tx.try_send(job) {
            warn!(error = %e, "reward_enqueue_failed");
        }
    }

    pub fn proximity_buffer_miles(&self) -> f64 {
        f64::from_bits(self.proximity_buffer_bits.load(Ordering::Relaxed))
    }

    /// Adjust the reward eligibility threshold; affects future evaluations only
    pub fn set_proximity_buffer(&self, miles: f64) {
        self.proximity_buffer_bits.store(miles.to_bits(), Ordering::Relaxed);
    }

    pub fn set_default_proximity_buffer(&self) {
        self.set_proximity_buffer(self.default_proximity_buffer_miles);
    }

    /// Evaluate every (visited location, attraction) pair for a user and
    /// record newly earned rewards.
    ///
    /// The dedup-by-name check runs before any distance or oracle work, and
    /// `User::add_reward` re-checks under the per-user lock, so concurrent
    /// evaluations of the same user record at most one reward per attraction.
    /// Works on a history snapshot; entries appended meanwhile are picked up
    /// by a later cycle.
    pub async fn evaluate(&self, user: &Arc<User>) {
        let locations = user.visited_locations();
        for visited in locations.iter() {
            for attraction in self.catalog.attractions() {
                if user.has_reward_for(&attraction.name) {
                    continue;
                }
                if !self.near_attraction(visited, attraction) {
                    continue;
                }
                match self.oracle.attraction_reward_points(attraction.id, user.id).await {
                    Ok(points) => {
                        let recorded = user.add_reward(UserReward::new(
                            visited.clone(),
                            attraction.clone(),
                            points,
                        ));
                        if recorded {
                            info!(
                                user = %user.name,
                                attraction = %attraction.name,
                                points = %points,
                                "reward_earned"
                            );
                        }
                    }
                    Err(e) => {
                        // Not recorded, so the pair stays eligible next pass
                        warn!(
                            user = %user.name,
                            attraction = %attraction.name,
                            error = %e,
                            "reward_oracle_failed"
                        );
                    }
                }
            }
        }
    }

    /// Reward eligibility: within the buffer, boundary inclusive
    fn near_attraction(&self, visited: &VisitedLocation, attraction: &Attraction) -> bool {
        distance_miles(attraction.position, visited.position) <= self.proximity_buffer_miles()
    }

    /// Coarse proximity check against the larger attraction range, boundary
    /// inclusive
    pub fn is_within_attraction_proximity(&self, attraction: &Attraction, location: Position) -> bool {
        distance_miles(attraction.position, location) <= self.attraction_proximity_miles
    }

    /// Oracle passthrough used by the nearby-attractions query
    pub async fn reward_points(&self, attraction: &Attraction, user: &User) -> anyhow::Result<i32> {
        self.oracle.attraction_reward_points(attraction.id, user.id).await
    }
}

/// Worker that drains the reward queue and runs evaluations concurrently
pub struct RewardWorker {
    service: Arc<RewardsService>,
    job_rx: mpsc::Receiver<RewardJob>,
    /// Bounds in-flight evaluations; the queue provides backpressure behind it
    limit: Arc<Semaphore>,
}

impl RewardWorker {
    pub fn new(
        service: Arc<RewardsService>,
        job_rx: mpsc::Receiver<RewardJob>,
        max_concurrent: usize,
    ) -> Self {
        Self { service, job_rx, limit: Arc::new(Semaphore::new(max_concurrent)) }
    }

    /// Run the worker, processing jobs until the channel closes
    pub async fn run(mut self) {
        info!("reward_worker_started");

        while let Some(job) = self.job_rx.recv().await {
            let queue_delay_us = job.enqueued_at.elapsed().as_micros() as u64;
            debug!(user = %job.user.name, queue_delay_us = %queue_delay_us, "reward_job_dequeued");

            let Ok(permit) = self.limit.clone().acquire_owned().await else {
                break;
            };
            let service = self.service.clone();
            tokio::spawn(async move {
                service.evaluate(&job.user).await;
                drop(permit);
            });
        }

        info!("reward_worker_stopped");
    }
}

/// Create the rewards service and its queue-draining worker
///
/// Returns the service (for triggering paths) and the worker (to be spawned)
pub fn create_rewards_engine(
    catalog: Arc<AttractionCatalog>,
    oracle: Arc<dyn RewardOracle>,
    config: &Config,
) -> (Arc<RewardsService>, RewardWorker) {
    let (job_tx, job_rx) = mpsc::channel(config.reward_queue_capacity());
    let service = Arc::new(RewardsService::new(catalog, oracle, config, job_tx));
    let worker = RewardWorker::new(service.clone(), job_rx, config.max_concurrent_evaluations());
    (service, worker)
}
