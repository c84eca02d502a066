//! # Core Engine Module
//!
//! Shared configuration types used by the world and by applications.

pub mod config;

pub use config::{
    Config,
    ConfigError,
    SimulationConfig,
    WorldConfig,
};
