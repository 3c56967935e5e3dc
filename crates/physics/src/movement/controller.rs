//! Character controller.
//!
//! The per-tick entry point for a kinematic character. It runs the models in
//! a fixed order against a collider and a read-only collision query.

use glam::Vec3;

use crate::host::{CharacterCollider, CollisionQuery};

use super::config::LocomotionConfig;
use super::ground::GroundSensor;
use super::locomotion::{Locomotion, LocomotionReport};
use super::stance::{StanceChange, StanceController};
use super::state::{CameraBasis, CharacterState, MotionFlags, MoveCommand};
use super::vertical::VerticalMotion;

/// Longest tick simulated in one step (seconds). Longer hitches are clamped.
pub const MAX_TICK_DELTA: f32 = 0.25;

/// Summary of one controller tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Ground sensor result at the start of the tick.
    pub grounded: bool,
    pub stance: Option<StanceChange>,
    pub locomotion: LocomotionReport,
    /// Launch velocity if a jump started this tick.
    pub launched: Option<f32>,
    /// Collider velocity after the tick.
    pub velocity: Vec3,
}

/// Kinematic character controller.
///
/// # Example
///
/// ```ignore
/// let controller = CharacterController::new(LocomotionConfig::default());
/// let mut state = CharacterState::new(spawn, 0.0);
///
/// // Each physics tick:
/// let mut attached = collider.attach(&world);
/// controller.update(&mut state, &command, Some(&camera), &mut attached, &world, dt);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController {
    pub config: LocomotionConfig,
    pub sensor: GroundSensor,
}

impl CharacterController {
    pub fn new(config: LocomotionConfig) -> Self {
        let sensor = GroundSensor::from_config(&config);
        Self { config, sensor }
    }

    /// Run one physics tick.
    ///
    /// Order: ground sensing, crouch, planar locomotion, vertical motion,
    /// then the collider closes the tick and the state's position is synced.
    /// A non-positive or non-finite `dt` leaves everything untouched.
    pub fn update(
        &self,
        state: &mut CharacterState,
        command: &MoveCommand,
        camera: Option<&CameraBasis>,
        collider: &mut impl CharacterCollider,
        query: &impl CollisionQuery,
        dt: f32,
    ) -> TickReport {
        if !dt.is_finite() || dt <= 0.0 {
            return TickReport::default();
        }
        let dt = dt.min(MAX_TICK_DELTA);

        // Ground
        let grounded = self.sensor.check(query, collider.position());
        state.flags.set(MotionFlags::GROUNDED, grounded);
        VerticalMotion::stick_to_ground(&self.config, state);

        // Crouch
        let stance = command
            .wants_crouch_toggle()
            .then(|| StanceController::toggle(&self.config, state, collider, query));

        let locomotion = Locomotion::update(&self.config, state, command, camera, collider, dt);
        let launched = VerticalMotion::update(&self.config, state, command.wants_jump(), collider, dt);

        collider.end_tick(dt);
        state.position = collider.position();

        TickReport {
            grounded,
            stance,
            locomotion,
            launched,
            velocity: collider.velocity(),
        }
    }
}
