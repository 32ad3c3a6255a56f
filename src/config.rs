//! Behavior tuning
//!
//! Loaded from RON so designers can tweak thresholds and speeds without a
//! rebuild. Every field has a default, so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning for the agent behavior controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Distance at which a waypoint counts as reached
    pub arrival_threshold: f32,
    /// Health fraction below which an agent is considered low on health
    pub low_health_threshold: f32,
    /// Upper health fraction at which a re-sighted agent goes back to evading
    pub evade_health_ceiling: f32,
    /// Speed cap while patrolling
    pub patrol_speed: f32,
    /// Speed cap while evading
    pub evade_speed: f32,
    /// Speed cap while slipping away to the exit
    pub slip_away_speed: f32,
    /// Speed cap while fleeing into cover
    pub low_hp_speed: f32,
    /// Speed cap while heading back to spawn
    pub controlled_speed: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            arrival_threshold: 100.0,
            low_health_threshold: 0.4,
            evade_health_ceiling: 0.9,
            patrol_speed: 300.0,
            evade_speed: 600.0,
            slip_away_speed: 400.0,
            low_hp_speed: 700.0,
            controlled_speed: 500.0,
        }
    }
}

impl BehaviorConfig {
    /// Set the waypoint arrival distance
    #[must_use]
    pub fn with_arrival_threshold(mut self, threshold: f32) -> Self {
        self.arrival_threshold = threshold;
        self
    }

    /// Set the health thresholds
    #[must_use]
    pub fn with_health_thresholds(mut self, low: f32, evade_ceiling: f32) -> Self {
        self.low_health_threshold = low;
        self.evade_health_ceiling = evade_ceiling;
        self
    }

    /// Set the patrol speed cap
    #[must_use]
    pub fn with_patrol_speed(mut self, speed: f32) -> Self {
        self.patrol_speed = speed;
        self
    }

    /// Parse a config from a RON string
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    }

    /// Load a config from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
