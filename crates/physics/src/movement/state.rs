//! Character state and per-tick commands.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::smoothing::{direction_of, wrap_degrees};

/// Flags describing the character's current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionFlags(pub u16);

impl MotionFlags {
    /// Ground sensor reported contact this tick.
    pub const GROUNDED: u16 = 1 << 0;

    /// Character is crouched.
    pub const CROUCHED: u16 = 1 << 1;

    /// Aim modifier held.
    pub const AIMING: u16 = 1 << 2;

    /// Run modifier held.
    pub const RUNNING: u16 = 1 << 3;

    #[inline]
    pub fn has(self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u16, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline]
    pub fn grounded(self) -> bool {
        self.has(Self::GROUNDED)
    }

    #[inline]
    pub fn crouched(self) -> bool {
        self.has(Self::CROUCHED)
    }

    #[inline]
    pub fn aiming(self) -> bool {
        self.has(Self::AIMING)
    }

    #[inline]
    pub fn running(self) -> bool {
        self.has(Self::RUNNING)
    }
}

/// Everything the locomotion and vertical models know about a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// Feet position in world space, synced from the collider each tick.
    pub position: Vec3,

    /// Facing in degrees, wrapped to (-180, 180].
    pub yaw: f32,

    /// Current smoothed planar speed (meters/second).
    pub speed: f32,

    /// Heading of the last movement direction in degrees.
    pub heading: f32,

    /// Vertical velocity (meters/second).
    pub vertical_velocity: f32,

    pub flags: MotionFlags,

    /// Angular velocity accumulator of the heading smooth-damp.
    pub(crate) turn_velocity: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

impl CharacterState {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        let yaw = wrap_degrees(yaw);
        Self {
            position,
            yaw,
            speed: 0.0,
            heading: yaw,
            vertical_velocity: 0.0,
            flags: MotionFlags::default(),
            turn_velocity: 0.0,
        }
    }

    /// Facing as a rotation about +Y.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Planar forward direction.
    pub fn forward(&self) -> Vec3 {
        direction_of(self.yaw)
    }

    /// Express a world-space vector in the character's local frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }
}

/// Button state flags for a [`MoveCommand`].
///
/// `JUMP` and `CROUCH` are press edges (true only on the tick the key went
/// down); the others are held states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveButtons(pub u16);

impl MoveButtons {
    pub const RUN: u16 = 1 << 0;

    pub const AIM: u16 = 1 << 1;

    /// Jump pressed this tick.
    pub const JUMP: u16 = 1 << 2;

    /// Jump held, for force-driven bodies.
    pub const JUMP_HELD: u16 = 1 << 3;

    /// Crouch toggle pressed this tick.
    pub const CROUCH: u16 = 1 << 4;

    #[inline]
    pub fn pressed(self, button: u16) -> bool {
        (self.0 & button) != 0
    }

    #[inline]
    pub fn press(&mut self, button: u16) {
        self.0 |= button;
    }
}

/// Movement intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Strafe axis in [-1, 1], positive is right.
    pub horizontal: f32,

    /// Forward axis in [-1, 1], positive is forward.
    pub vertical: f32,

    pub buttons: MoveButtons,
}

impl MoveCommand {
    /// Build a command, clamping the axes. Non-finite axes read as zero.
    pub fn new(horizontal: f32, vertical: f32, buttons: MoveButtons) -> Self {
        Self {
            horizontal: clamp_axis(horizontal),
            vertical: clamp_axis(vertical),
            buttons,
        }
    }

    /// Magnitude of the raw 2D input, clamped to 1.
    pub fn magnitude(&self) -> f32 {
        (self.horizontal * self.horizontal + self.vertical * self.vertical)
            .sqrt()
            .min(1.0)
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.buttons.pressed(MoveButtons::RUN)
    }

    #[inline]
    pub fn aiming(&self) -> bool {
        self.buttons.pressed(MoveButtons::AIM)
    }

    #[inline]
    pub fn wants_jump(&self) -> bool {
        self.buttons.pressed(MoveButtons::JUMP)
    }

    #[inline]
    pub fn jump_held(&self) -> bool {
        self.buttons.pressed(MoveButtons::JUMP_HELD)
    }

    #[inline]
    pub fn wants_crouch_toggle(&self) -> bool {
        self.buttons.pressed(MoveButtons::CROUCH)
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Planar camera directions that movement input is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Unit forward in the ground plane.
    pub forward: Vec3,
    /// Unit right in the ground plane.
    pub right: Vec3,
}

impl CameraBasis {
    /// World forward/right, used when no camera is available.
    pub const WORLD: Self = Self {
        forward: Vec3::Z,
        right: Vec3::X,
    };

    /// Basis for a camera yaw in degrees.
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            forward: direction_of(yaw),
            right: direction_of(yaw + 90.0),
        }
    }

    /// Basis from a full camera rotation, flattened onto the ground plane.
    pub fn from_rotation(rotation: Quat) -> Self {
        let flatten = |v: Vec3| {
            let flat = Vec3::new(v.x, 0.0, v.z);
            (flat.length_squared() > 1.0e-6).then(|| flat.normalize())
        };

        let Some(right) = flatten(rotation * Vec3::X) else {
            return Self::WORLD;
        };
        // Looking straight up or down: recover forward from right
        let forward = flatten(rotation * Vec3::Z).unwrap_or_else(|| right.cross(Vec3::Y));

        Self { forward, right }
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::WORLD
    }
}
