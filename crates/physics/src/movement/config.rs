//! Locomotion tuning.
//!
//! All values use metric units (meters, seconds) and degrees.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::LayerMask;
use crate::error::{ensure_finite, ensure_ordered, ensure_positive, ensure_within, ConfigError};

/// Configuration for the locomotion, vertical motion and stance models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Speeds
    // ========================================================================
    /// Base walking speed (meters/second).
    pub walk_speed: f32,

    /// Multiplier applied to walk speed while running.
    pub run_multiplier: f32,

    /// Multiplier applied while crouched.
    pub crouch_speed_multiplier: f32,

    /// Multiplier applied while aiming.
    pub aim_move_multiplier: f32,

    /// Rate of the first-order lag toward the desired speed (1/second).
    pub acceleration: f32,

    /// Input magnitude below which the character holds still.
    pub input_dead_zone: f32,

    // ========================================================================
    // Turning
    // ========================================================================
    /// Smoothing time for turning toward the movement direction (seconds).
    pub rotate_smooth_time: f32,

    /// Blend rate toward the camera's facing while aiming (1/second).
    pub aim_turn_rate: f32,

    // ========================================================================
    // Vertical
    // ========================================================================
    /// Gravity acceleration (meters/second², negative is down).
    pub gravity: f32,

    /// Apex height of a jump (meters).
    pub jump_height: f32,

    /// Vertical velocity held while grounded, keeps the character on slopes.
    pub grounded_velocity: f32,

    // ========================================================================
    // Ground check
    // ========================================================================
    /// Probe position relative to the character's feet.
    pub ground_check_offset: Vec3,

    /// Probe sphere radius (meters).
    pub ground_distance: f32,

    /// Layers counted as ground.
    pub ground_mask: LayerMask,

    // ========================================================================
    // Stance
    // ========================================================================
    pub stand_height: f32,

    pub crouch_height: f32,

    /// Refuse to stand up when the standing capsule would not fit.
    pub check_headroom: bool,

    /// Layers tested by the headroom check.
    pub headroom_mask: LayerMask,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_multiplier: 3.0,
            crouch_speed_multiplier: 0.5,
            aim_move_multiplier: 0.5,
            acceleration: 10.0,
            input_dead_zone: 0.01,

            rotate_smooth_time: 0.12,
            aim_turn_rate: 10.0,

            gravity: -20.0,
            jump_height: 1.5,
            grounded_velocity: -2.0,

            ground_check_offset: Vec3::new(0.0, 0.1, 0.0),
            ground_distance: 0.2,
            ground_mask: LayerMask::GROUND,

            stand_height: 2.0,
            crouch_height: 1.0,
            check_headroom: true,
            headroom_mask: LayerMask::MOVEMENT_BLOCKING,
        }
    }
}

impl LocomotionConfig {
    /// Full running speed, the scale for the animation blend axes.
    pub fn run_speed(&self) -> f32 {
        self.walk_speed * self.run_multiplier
    }

    /// Speed for the given modifiers. Multipliers compose.
    pub fn target_speed(&self, running: bool, crouched: bool, aiming: bool) -> f32 {
        let mut speed = if running { self.run_speed() } else { self.walk_speed };
        if crouched {
            speed *= self.crouch_speed_multiplier;
        }
        if aiming {
            speed *= self.aim_move_multiplier;
        }
        speed
    }

    /// Launch velocity reaching `jump_height` under `gravity`.
    pub fn jump_launch_velocity(&self) -> f32 {
        (2.0 * self.jump_height * self.gravity.abs()).sqrt()
    }

    /// Collider height for a stance.
    pub fn height(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouch_height
        } else {
            self.stand_height
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("walk_speed", self.walk_speed)?;
        ensure_positive("run_multiplier", self.run_multiplier)?;
        ensure_positive("crouch_speed_multiplier", self.crouch_speed_multiplier)?;
        ensure_positive("aim_move_multiplier", self.aim_move_multiplier)?;
        ensure_positive("acceleration", self.acceleration)?;
        ensure_within("input_dead_zone", self.input_dead_zone, 0.0, 1.0)?;
        ensure_positive("rotate_smooth_time", self.rotate_smooth_time)?;
        ensure_positive("aim_turn_rate", self.aim_turn_rate)?;

        ensure_ordered("gravity", self.gravity, "0", 0.0)?;
        ensure_positive("jump_height", self.jump_height)?;
        ensure_ordered("grounded_velocity", self.grounded_velocity, "0", 0.0)?;

        if !self.ground_check_offset.is_finite() {
            return Err(ConfigError::NonFinite { field: "ground_check_offset" });
        }
        ensure_positive("ground_distance", self.ground_distance)?;

        ensure_positive("crouch_height", self.crouch_height)?;
        ensure_finite("stand_height", self.stand_height)?;
        ensure_ordered("crouch_height", self.crouch_height, "stand_height", self.stand_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_speed_multipliers_compose() {
        let config = LocomotionConfig::default();
        assert_eq!(config.target_speed(false, false, false), 2.0);
        assert_eq!(config.target_speed(true, false, false), 6.0);
        assert_eq!(config.target_speed(true, true, false), 3.0);
        assert_eq!(config.target_speed(true, true, true), 1.5);
    }

    #[test]
    fn test_jump_launch_velocity() {
        let config = LocomotionConfig::default();
        let v = config.jump_launch_velocity();
        assert!((v * v - 2.0 * 1.5 * 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_validate_rejects_inverted_heights() {
        assert!(LocomotionConfig::default().validate().is_ok());

        let config = LocomotionConfig {
            crouch_height: 2.5,
            ..LocomotionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                low_field: "crouch_height",
                low: 2.5,
                high_field: "stand_height",
                high: 2.0,
            })
        );
    }

    #[test]
    fn test_validate_rejects_upward_gravity() {
        let config = LocomotionConfig {
            gravity: 9.81,
            ..LocomotionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
