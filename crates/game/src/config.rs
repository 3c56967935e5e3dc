//! Game configuration loading from TOML.
//!
//! Every section is optional; missing sections and fields take their
//! defaults. The loaded configuration is validated before it is returned.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vantage_camera::OrbitConfig;
use vantage_physics::error::{ensure_ordered, ensure_positive, ensure_within, ConfigError};
use vantage_physics::host::BodyConfig;
use vantage_physics::movement::{ForceConfig, LocomotionConfig};
use vantage_physics::ColliderConfig;

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Gravity applied to force-driven bodies (meters/second²).
    pub body_gravity: Vec3,

    pub locomotion: LocomotionConfig,

    pub camera: OrbitConfig,

    pub collider: ColliderConfig,

    pub force: ForceConfig,

    pub body: BodyConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            body_gravity: Vec3::new(0.0, -9.81, 0.0),
            locomotion: LocomotionConfig::default(),
            camera: OrbitConfig::default(),
            collider: ColliderConfig::default(),
            force: ForceConfig::default(),
            body: BodyConfig::default(),
        }
    }
}

/// Errors that can occur when loading game configuration.
#[derive(Debug, Error)]
pub enum GameConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, GameConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, GameConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| GameConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("tick_rate", self.tick_rate as f32)?;
        if !self.body_gravity.is_finite() {
            return Err(ConfigError::NonFinite { field: "body_gravity" });
        }
        self.locomotion.validate()?;
        self.camera.validate()?;
        self.collider.validate()?;
        self.force.validate()?;
        self.body.validate()?;

        // The collider resizes between these heights and must stay an upright
        // capsule at both.
        ensure_ordered(
            "collider.radius * 2",
            self.collider.radius * 2.0,
            "locomotion.crouch_height",
            self.locomotion.crouch_height,
        )?;
        ensure_within(
            "collider.height",
            self.collider.height,
            self.locomotion.stand_height,
            self.locomotion.stand_height,
        )
    }

    /// Time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}
