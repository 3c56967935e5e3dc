//! Animation parameter bridge.
//!
//! Projects character state onto named blend parameters. Nothing flows back
//! from the animation side into movement.

use glam::Vec3;
use vantage_physics::movement::CharacterState;
use vantage_physics::smoothing::smooth_damp;

/// Typed animation parameter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    Speed,
    MoveX,
    MoveY,
    IsGrounded,
    IsCrouched,
    IsAiming,
    VerticalVelocity,
}

impl AnimParam {
    pub const ALL: [AnimParam; 7] = [
        AnimParam::Speed,
        AnimParam::MoveX,
        AnimParam::MoveY,
        AnimParam::IsGrounded,
        AnimParam::IsCrouched,
        AnimParam::IsAiming,
        AnimParam::VerticalVelocity,
    ];

    /// Parameter name as authored in animation controllers.
    pub fn name(self) -> &'static str {
        match self {
            AnimParam::Speed => "Speed",
            AnimParam::MoveX => "MoveX",
            AnimParam::MoveY => "MoveY",
            AnimParam::IsGrounded => "IsGrounded",
            AnimParam::IsCrouched => "IsCrouched",
            AnimParam::IsAiming => "IsAiming",
            AnimParam::VerticalVelocity => "VerticalVelocity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Receives parameter values from the bridge.
pub trait AnimationSink {
    fn set_float(&mut self, param: AnimParam, value: f32);

    /// Move a float toward `value`, smoothed over `damp_time` seconds.
    fn set_float_damped(&mut self, param: AnimParam, value: f32, damp_time: f32, dt: f32);

    fn set_bool(&mut self, param: AnimParam, value: bool);
}

/// Maps character state to animation parameters each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationBridge {
    /// Speed that maps to a full blend axis deflection.
    pub run_speed: f32,
    /// Damping time of the blend axes.
    pub damp_time: f32,
}

impl AnimationBridge {
    pub const DEFAULT_DAMP_TIME: f32 = 0.1;

    pub fn new(run_speed: f32) -> Self {
        Self {
            run_speed,
            damp_time: Self::DEFAULT_DAMP_TIME,
        }
    }

    /// Push this tick's parameters. `velocity` is the collider's velocity.
    pub fn update(&self, state: &CharacterState, velocity: Vec3, sink: &mut impl AnimationSink, dt: f32) {
        let local = state.to_local(velocity);
        let (right, forward) = if self.run_speed > 0.0 {
            (
                (local.x / self.run_speed).clamp(-1.0, 1.0),
                (local.z / self.run_speed).clamp(-1.0, 1.0),
            )
        } else {
            (0.0, 0.0)
        };

        sink.set_float(AnimParam::Speed, velocity.length());
        sink.set_float_damped(AnimParam::MoveX, right, self.damp_time, dt);
        sink.set_float_damped(AnimParam::MoveY, forward, self.damp_time, dt);
        sink.set_bool(AnimParam::IsGrounded, state.flags.grounded());
        sink.set_bool(AnimParam::IsCrouched, state.flags.crouched());
        sink.set_bool(AnimParam::IsAiming, state.flags.aiming());
        sink.set_float(AnimParam::VerticalVelocity, state.vertical_velocity);
    }
}

/// An in-memory animator that stores the latest parameter values.
///
/// Damped floats are smoothed the way animation controllers usually do it,
/// with a persistent velocity per parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingAnimator {
    floats: [f32; 7],
    damp_velocities: [f32; 7],
    bools: [bool; 7],
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn float(&self, param: AnimParam) -> f32 {
        self.floats[param.index()]
    }

    pub fn bool(&self, param: AnimParam) -> bool {
        self.bools[param.index()]
    }
}

impl AnimationSink for RecordingAnimator {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats[param.index()] = value;
    }

    fn set_float_damped(&mut self, param: AnimParam, value: f32, damp_time: f32, dt: f32) {
        let i = param.index();
        self.floats[i] = smooth_damp(self.floats[i], value, &mut self.damp_velocities[i], damp_time, dt);
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools[param.index()] = value;
    }
}
