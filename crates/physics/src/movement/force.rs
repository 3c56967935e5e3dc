//! Force-driven movement for rigid-body characters.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ConfigError};
use crate::host::RigidBody;

use super::state::MoveCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Multiplier applied to the whole input force.
    pub force_scale: f32,
    /// Upward input component while jump is held.
    pub jump_force: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            force_scale: 10.0,
            jump_force: 5.0,
        }
    }
}

impl ForceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("force.force_scale", self.force_scale)?;
        ensure_finite("force.jump_force", self.jump_force)
    }
}

/// Pushes a rigid body around with the movement axes.
///
/// Applies `(h, jump, v) * scale` every physics tick, where `jump` is
/// `jump_force` while the jump key is held. There is no ground check, so a
/// held jump keeps pushing upward.
#[derive(Debug, Clone, Default)]
pub struct ForceMover {
    pub config: ForceConfig,
}

impl ForceMover {
    pub fn new(config: ForceConfig) -> Self {
        Self { config }
    }

    /// Force for a command.
    pub fn force_for(&self, command: &MoveCommand) -> Vec3 {
        let lift = if command.jump_held() { self.config.jump_force } else { 0.0 };
        Vec3::new(command.horizontal, lift, command.vertical) * self.config.force_scale
    }

    /// Apply this tick's force to `body`. Returns the force applied.
    pub fn update(&self, command: &MoveCommand, body: &mut impl RigidBody) -> Vec3 {
        let force = self.force_for(command);
        body.apply_force(force);
        force
    }
}
