//! tourtrack - concurrent user tracking and reward engine
//!
//! Periodically refreshes every known user's position in parallel, matches
//! location history against the attraction catalog, and records deduplicated
//! rewards scored by an external oracle.
//!
//! Module structure:
//! - `domain/` - Core business types (User, VisitedLocation, Attraction, Reward)
//! - `io/` - External interfaces (location provider, reward oracle, catalog)
//! - `services/` - Business logic (Tracker, LocationService, RewardsService)
//! - `infra/` - Infrastructure (Config)

use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;
use tourtrack::infra::Config;
use tourtrack::io::{AttractionCatalog, SimulatedGps, SimulatedRewardCentral};
use tourtrack::services::{create_rewards_engine, LocationService, Tracker, UserRegistry};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// tourtrack - user tracking and attraction reward service
#[derive(Parser, Debug)]
#[command(name = "tourtrack", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("tourtrack starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        tracking_interval_secs = %config.tracking_interval_secs(),
        proximity_buffer_miles = %config.proximity_buffer_miles(),
        user_count = %config.user_count(),
        max_concurrent_evaluations = %config.max_concurrent_evaluations(),
        "config_loaded"
    );

    // External collaborators (simulated in this build)
    let catalog = Arc::new(AttractionCatalog::builtin());
    let gps = Arc::new(SimulatedGps::new(config.gps_latency_ms()));
    let oracle = Arc::new(SimulatedRewardCentral::new(config.reward_latency_ms()));

    // Registry seeded with internal users
    let registry = Arc::new(UserRegistry::new());
    tourtrack::io::sim::seed_users(&registry, config.user_count());
    info!(user_count = registry.len(), "registry_ready");

    // Reward engine: service for triggering, worker draining the queue
    let (rewards, reward_worker) = create_rewards_engine(catalog.clone(), oracle, &config);
    tokio::spawn(reward_worker.run());

    let locator = Arc::new(LocationService::new(gps, catalog, rewards));

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Handle shutdown on Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    // Run the tracker until shutdown
    let tracker = Tracker::new(
        locator,
        registry,
        Duration::from_secs(config.tracking_interval_secs()),
    );
    tracker.run(shutdown_rx).await;

    info!("tourtrack shutdown complete");
    Ok(())
}
