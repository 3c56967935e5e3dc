//! Vantage physics: character motion for a third-person controller.
//!
//! The motion models (ground sensing, planar locomotion, vertical motion,
//! crouch and force-driven movement) consume the host's physics through the
//! narrow traits in [`host`]. A small reference host backed by parry3d is
//! included so the models can be run and tested without an engine.
//!
//! # Architecture
//!
//! - **Collision**: static world, sphere probes, capsule sweeps with slide
//! - **Host**: capability traits plus the reference collider and body
//! - **Movement**: the per-tick models and the controller that orders them
//!
//! Coordinates are +Y up, +Z forward, +X right. Angles are in degrees.

pub mod collision;
pub mod error;
pub mod host;
pub mod movement;
pub mod smoothing;

// Re-export commonly used types
pub use collision::{CollisionWorld, LayerMask, TraceResult, TraceShape};
pub use error::ConfigError;
pub use host::{
    CharacterCollider, ColliderConfig, CollisionQuery, DynamicBody, KinematicCollider, RigidBody,
};
pub use movement::{
    CameraBasis, CharacterController, CharacterState, LocomotionConfig, MotionFlags, MoveButtons,
    MoveCommand,
};
