//! Simulation configuration and validation.
//!
//! Every tunable constant of the colony lives in [`SimConfig`]. Defaults
//! reproduce the classic 800x480 colony: one queen, three starting workers,
//! a new worker every 30 seconds and a new piece of food every 10.
//!
//! ```rust
//! use antsim_core::config::{SimConfig, validate_config};
//!
//! let config = SimConfig {
//!     rng_seed: Some(7),
//!     ..SimConfig::default()
//! };
//! assert!(validate_config(&config).is_empty());
//! ```

use std::f32::consts::FRAC_PI_4;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Bounds;

/// Startup configuration for a colony
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Total ant limit, queen included. The queen is spawned regardless.
    pub max_population: usize,
    /// Workers spawned right after the queen at startup
    pub initial_workers: usize,
    /// Seconds between worker spawns
    pub worker_spawn_interval: f32,
    /// Seconds between food spawns
    pub food_spawn_interval: f32,
    pub worker_speed: f32,
    pub queen_speed: f32,
    pub worker_size: f32,
    pub queen_size: f32,
    pub food_size: f32,
    /// Workers notice available food closer than this
    pub food_detection_radius: f32,
    /// Pickup and drop-off distance
    pub pickup_radius: f32,
    pub queen_orbit_radius: f32,
    /// Radians per second
    pub queen_angular_speed: f32,
    /// Per-tick probability that a worker picks a new random direction
    pub direction_change_chance: f32,
    /// Seconds between removals of claimed food. 0 disables compaction.
    pub food_compaction_interval: f32,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub rng_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 480,
            max_population: 100_000,
            initial_workers: 3,
            worker_spawn_interval: 30.0,
            food_spawn_interval: 10.0,
            worker_speed: 2.0,
            queen_speed: 1.0,
            worker_size: 4.0,
            queen_size: 5.0,
            food_size: 2.0,
            food_detection_radius: 50.0,
            pickup_radius: 2.0,
            queen_orbit_radius: 50.0,
            queen_angular_speed: FRAC_PI_4,
            direction_change_chance: 0.02,
            food_compaction_interval: 60.0,
            rng_seed: None,
        }
    }
}

impl SimConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.screen_width, self.screen_height)
    }

    /// Build the run's random generator from `rng_seed`, or from entropy
    pub fn seeded_rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Problems found in a [`SimConfig`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The screen has no room for an entity of this size
    #[error("screen {width}x{height} too small for {entity} of size {size}")]
    ScreenTooSmall {
        entity: &'static str,
        width: u32,
        height: u32,
        size: f32,
    },
    /// A quantity that must be strictly positive and finite
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    /// A quantity that may take any sign but must be a real number
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    /// A per-tick probability outside `[0, 1]`
    #[error("{field} must be within [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f32 },
    /// A quantity that may be zero but not negative
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    /// An interval in seconds too long to represent as a `Duration`
    #[error("{field} is too long to schedule, got {value}")]
    IntervalTooLarge { field: &'static str, value: f32 },
}

/// Validate a config, returning every problem found (empty = valid)
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let positive = [
        ("worker_spawn_interval", config.worker_spawn_interval),
        ("food_spawn_interval", config.food_spawn_interval),
        ("worker_speed", config.worker_speed),
        ("queen_speed", config.queen_speed),
        ("worker_size", config.worker_size),
        ("queen_size", config.queen_size),
        ("food_size", config.food_size),
        ("food_detection_radius", config.food_detection_radius),
        ("pickup_radius", config.pickup_radius),
        ("queen_orbit_radius", config.queen_orbit_radius),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            errors.push(ConfigError::NotPositive { field, value });
        }
    }

    if !config.queen_angular_speed.is_finite() {
        errors.push(ConfigError::NotFinite {
            field: "queen_angular_speed",
            value: config.queen_angular_speed,
        });
    }

    if !(0.0..=1.0).contains(&config.direction_change_chance) {
        errors.push(ConfigError::InvalidProbability {
            field: "direction_change_chance",
            value: config.direction_change_chance,
        });
    }

    if config.food_compaction_interval.is_nan() || config.food_compaction_interval < 0.0 {
        errors.push(ConfigError::Negative {
            field: "food_compaction_interval",
            value: config.food_compaction_interval,
        });
    }

    let intervals = [
        ("worker_spawn_interval", config.worker_spawn_interval),
        ("food_spawn_interval", config.food_spawn_interval),
        ("food_compaction_interval", config.food_compaction_interval),
    ];
    for (field, value) in intervals {
        if value.is_finite() && value > 0.0 && Duration::try_from_secs_f32(value).is_err() {
            errors.push(ConfigError::IntervalTooLarge { field, value });
        }
    }

    // Spawn ranges are [0, screen - size); they must not be empty
    let sizes = [
        ("worker", config.worker_size),
        ("queen", config.queen_size),
        ("food", config.food_size),
    ];
    for (entity, size) in sizes {
        if size.is_finite()
            && (config.screen_width as f32 <= size || config.screen_height as f32 <= size)
        {
            errors.push(ConfigError::ScreenTooSmall {
                entity,
                width: config.screen_width,
                height: config.screen_height,
                size,
            });
        }
    }

    errors
}
