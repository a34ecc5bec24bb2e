//! Runtime simulation configuration.
//!
//! [`SimConfig`] can be loaded from a TOML file. Every missing key falls back
//! to the compile-time default in [`crate::constants`], so a minimal file can
//! override only what it cares about:
//!
//! ```toml
//! seed = 7
//! contact_damage_cooldown_secs = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub world_width: f64,
    pub world_height: f64,
    /// Floating platforms generated in addition to the ground.
    pub platform_count: usize,
    /// Bound on the presentation -> simulation queue.
    pub inbound_capacity: usize,
    /// Bound on the simulation -> presentation queue.
    pub outbound_capacity: usize,
    /// Minimum time between contact hits from the same enemy.
    /// `0.0` damages on every overlapping tick.
    pub contact_damage_cooldown_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            platform_count: PLATFORM_COUNT,
            inbound_capacity: DEFAULT_QUEUE_CAPACITY,
            outbound_capacity: DEFAULT_QUEUE_CAPACITY,
            contact_damage_cooldown_secs: 0.0,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Platforms are 200 px wide and enemies spawn 100 px inside each edge.
        let min_width = PLATFORM_WIDTH.max(2.0 * ENEMY_SPAWN_INSET);
        if !self.world_width.is_finite() || self.world_width <= min_width {
            return Err(ConfigError::Invalid {
                field: "world_width",
                reason: format!("must be finite and exceed {min_width}, got {}", self.world_width),
            });
        }
        // Platforms are placed between y = 100 and height - 150.
        if !self.world_height.is_finite() || self.world_height <= 300.0 {
            return Err(ConfigError::Invalid {
                field: "world_height",
                reason: format!("must be finite and exceed 300, got {}", self.world_height),
            });
        }
        if self.inbound_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "inbound_capacity",
                reason: "must be at least 1".into(),
            });
        }
        if self.outbound_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "outbound_capacity",
                reason: "must be at least 1".into(),
            });
        }
        if !self.contact_damage_cooldown_secs.is_finite() || self.contact_damage_cooldown_secs < 0.0 {
            return Err(ConfigError::Invalid {
                field: "contact_damage_cooldown_secs",
                reason: format!(
                    "must be finite and not negative, got {}",
                    self.contact_damage_cooldown_secs
                ),
            });
        }
        Ok(())
    }
}
