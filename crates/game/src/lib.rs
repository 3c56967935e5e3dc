//! Vantage game layer
//!
//! This crate wires the motion core into a running simulation:
//!
//! - Input sampling with edge-triggered jump and crouch
//! - Characters, force-driven bodies and the followed camera
//! - Animation parameter bridge
//! - Level geometry and TOML configuration
//!
//! # Architecture
//!
//! Every tick runs a physics phase followed by a camera phase, so the camera
//! always reads the character's settled position.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Game Simulation                        │
//! │  ┌─────────┐    ┌───────────────┐    ┌──────────────────┐  │
//! │  │ Input   │───►│ Physics phase │───►│ Camera phase     │  │
//! │  │ Sampler │    │ (characters,  │    │ (orbit, occlusion│  │
//! │  └─────────┘    │  bodies, anim)│    │  smoothing)      │  │
//! │                 └───────────────┘    └──────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod animation;
pub mod character;
pub mod config;
pub mod input;
pub mod level;
pub mod simulation;

// Re-export main types
pub use animation::{AnimParam, AnimationBridge, AnimationSink, RecordingAnimator};
pub use character::{Character, EntityId, Roller};
pub use config::{GameConfig, GameConfigError};
pub use input::{HeldKeys, InputSampler, InputSnapshot, MovementKeys, TickInput};
pub use level::{Level, SpawnPoint};
pub use simulation::{FrameReport, Simulation};

// Re-export core types for convenience
pub use vantage_camera::{OrbitCamera, OrbitConfig, OrbitFrame, PointerInput};
pub use vantage_physics::{
    CameraBasis, CharacterController, CharacterState, CollisionWorld, LayerMask, LocomotionConfig,
    MoveButtons, MoveCommand,
};
