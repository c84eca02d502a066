//! # Simulation Configuration
//!
//! Settings for the world (gravity, collider visualization) and for a
//! headless simulation run (logging, frame count, time step). Both load
//! from TOML or RON through the [`Config`] trait.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

pub use crate::config::{Config, ConfigError};

/// Standard gravity along -Y
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

/// # World Configuration
///
/// Global physics settings applied when a world is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration in world units per second squared
    pub gravity: Vec3,
    /// Whether collider outlines are emitted by `draw_debug_primitives`
    pub debug_draw_colliders: bool,
}

impl WorldConfig {
    /// Create a world configuration with standard gravity
    pub fn new() -> Self {
        Self {
            gravity: Vec3::from(DEFAULT_GRAVITY),
            debug_draw_colliders: false,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Enable collider visualization
    pub fn with_debug_draw_colliders(mut self, enabled: bool) -> Self {
        self.debug_draw_colliders = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("gravity must be finite".to_string()));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for WorldConfig {}

/// # Simulation Configuration
///
/// Drives a headless run: logging level, how many frames to step and the
/// time step handed to each `World::update` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Log level filter passed to env_logger
    pub log_level: String,
    /// Number of frames to simulate
    pub frame_count: u32,
    /// Seconds per frame
    pub time_step: f32,
    /// World settings
    pub world: WorldConfig,
}

impl SimulationConfig {
    /// Create a simulation configuration (60 Hz, 3 seconds)
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_count: 180,
            time_step: 1.0 / 60.0,
            world: WorldConfig::new(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the number of frames
    pub fn with_frame_count(mut self, frames: u32) -> Self {
        self.frame_count = frames;
        self
    }

    /// Set the time step
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set world settings
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }

        self.world.validate()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SimulationConfig {}
