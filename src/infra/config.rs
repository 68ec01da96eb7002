//! Configuration loading from TOML files
//!
//! Config file is selected via the --config command line argument; a missing
//! or unparsable file falls back to defaults.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    /// Sleep between tracking cycles (seconds)
    #[serde(default = "default_tracking_interval_secs")]
    pub interval_secs: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { interval_secs: default_tracking_interval_secs() }
    }
}

fn default_tracking_interval_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    /// Reward eligibility threshold (statute miles)
    #[serde(default = "default_proximity_buffer_miles")]
    pub proximity_buffer_miles: f64,
    /// Coarse attraction proximity range (statute miles)
    #[serde(default = "default_attraction_proximity_miles")]
    pub attraction_proximity_miles: f64,
    /// Capacity of the reward evaluation queue
    #[serde(default = "default_reward_queue_capacity")]
    pub queue_capacity: usize,
    /// Maximum reward evaluations in flight at once
    #[serde(default = "default_max_concurrent_evaluations")]
    pub max_concurrent_evaluations: usize,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            proximity_buffer_miles: default_proximity_buffer_miles(),
            attraction_proximity_miles: default_attraction_proximity_miles(),
            queue_capacity: default_reward_queue_capacity(),
            max_concurrent_evaluations: default_max_concurrent_evaluations(),
        }
    }
}

fn default_proximity_buffer_miles() -> f64 {
    10.0
}

fn default_attraction_proximity_miles() -> f64 {
    200.0
}

fn default_reward_queue_capacity() -> usize {
    1000
}

fn default_max_concurrent_evaluations() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Number of internal users to seed at startup
    #[serde(default = "default_user_count")]
    pub user_count: usize,
    /// Artificial latency of the simulated GPS provider (milliseconds)
    #[serde(default = "default_gps_latency_ms")]
    pub gps_latency_ms: u64,
    /// Artificial latency of the simulated reward oracle (milliseconds)
    #[serde(default = "default_reward_latency_ms")]
    pub reward_latency_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            user_count: default_user_count(),
            gps_latency_ms: default_gps_latency_ms(),
            reward_latency_ms: default_reward_latency_ms(),
        }
    }
}

fn default_user_count() -> usize {
    100
}

fn default_gps_latency_ms() -> u64 {
    50
}

fn default_reward_latency_ms() -> u64 {
    50
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    tracking_interval_secs: u64,
    proximity_buffer_miles: f64,
    attraction_proximity_miles: f64,
    reward_queue_capacity: usize,
    max_concurrent_evaluations: usize,
    user_count: usize,
    gps_latency_ms: u64,
    reward_latency_ms: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default")
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: &str) -> Self {
        Self {
            tracking_interval_secs: toml_config.tracking.interval_secs,
            proximity_buffer_miles: toml_config.rewards.proximity_buffer_miles,
            attraction_proximity_miles: toml_config.rewards.attraction_proximity_miles,
            reward_queue_capacity: toml_config.rewards.queue_capacity,
            max_concurrent_evaluations: toml_config.rewards.max_concurrent_evaluations,
            user_count: toml_config.sim.user_count,
            gps_latency_ms: toml_config.sim.gps_latency_ms,
            reward_latency_ms: toml_config.sim.reward_latency_ms,
            config_file: config_file.to_string(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, &path.display().to_string()))
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn tracking_interval_secs(&self) -> u64 {
        self.tracking_interval_secs
    }

    pub fn proximity_buffer_miles(&self) -> f64 {
        self.proximity_buffer_miles
    }

    pub fn attraction_proximity_miles(&self) -> f64 {
        self.attraction_proximity_miles
    }

    pub fn reward_queue_capacity(&self) -> usize {
        self.reward_queue_capacity
    }

    pub fn max_concurrent_evaluations(&self) -> usize {
        self.max_concurrent_evaluations
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }

    pub fn gps_latency_ms(&self) -> u64 {
        self.gps_latency_ms
    }

    pub fn reward_latency_ms(&self) -> u64 {
        self.reward_latency_ms
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests and tools to set the tracking interval
    pub fn with_tracking_interval_secs(mut self, secs: u64) -> Self {
        self.tracking_interval_secs = secs;
        self
    }

    /// Builder method for tests and tools to set the proximity buffer
    pub fn with_proximity_buffer_miles(mut self, miles: f64) -> Self {
        self.proximity_buffer_miles = miles;
        self
    }

    /// Builder method for tests and tools to set the evaluation concurrency
    pub fn with_max_concurrent_evaluations(mut self, n: usize) -> Self {
        self.max_concurrent_evaluations = n;
        self
    }
}
