//! Gravity, jump launch and ground stick.

use glam::Vec3;

use crate::host::CharacterCollider;

use super::config::LocomotionConfig;
use super::state::CharacterState;

/// The vertical motion model.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalMotion;

impl VerticalMotion {
    /// Keep a grounded character pressed onto the ground.
    ///
    /// Runs right after ground sensing, before gravity is integrated.
    pub fn stick_to_ground(config: &LocomotionConfig, state: &mut CharacterState) {
        if state.flags.grounded() && state.vertical_velocity < 0.0 {
            state.vertical_velocity = config.grounded_velocity;
        }
    }

    /// Launch velocity for the configured jump height.
    pub fn launch_velocity(config: &LocomotionConfig) -> f32 {
        config.jump_launch_velocity()
    }

    /// Apply a jump request, integrate gravity and submit the vertical move.
    ///
    /// Returns the launch velocity when a jump was granted. Jumps are only
    /// granted while grounded and are never buffered.
    pub fn update(
        config: &LocomotionConfig,
        state: &mut CharacterState,
        jump_requested: bool,
        collider: &mut impl CharacterCollider,
        dt: f32,
    ) -> Option<f32> {
        let mut launched = None;
        if jump_requested && state.flags.grounded() {
            let velocity = Self::launch_velocity(config);
            state.vertical_velocity = velocity;
            launched = Some(velocity);
            log::debug!("jump launched at {:.3} m/s", velocity);
        }

        state.vertical_velocity += config.gravity * dt;
        collider.move_by(Vec3::new(0.0, state.vertical_velocity * dt, 0.0));

        launched
    }
}
