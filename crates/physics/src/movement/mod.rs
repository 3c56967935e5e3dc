//! Character motion models.
//!
//! - [`GroundSensor`]: sphere probe for ground contact
//! - [`Locomotion`]: planar speed, facing and displacement
//! - [`VerticalMotion`]: gravity, jump launch and ground stick
//! - [`StanceController`]: crouch toggle with headroom check
//! - [`ForceMover`]: force-driven variant for rigid bodies
//!
//! [`CharacterController`] runs the kinematic models in order each tick.
//! Every model reads the elapsed time from its caller; none keeps a clock.

mod config;
mod controller;
mod force;
mod ground;
mod locomotion;
mod stance;
mod state;
mod vertical;

pub use config::LocomotionConfig;
pub use controller::{CharacterController, TickReport, MAX_TICK_DELTA};
pub use force::{ForceConfig, ForceMover};
pub use ground::{probe, GroundSensor};
pub use locomotion::{Locomotion, LocomotionReport};
pub use stance::{Stance, StanceChange, StanceController};
pub use state::{CameraBasis, CharacterState, MotionFlags, MoveButtons, MoveCommand};
pub use vertical::VerticalMotion;
