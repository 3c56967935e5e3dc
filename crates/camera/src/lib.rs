//! Vantage camera: a third-person orbit camera.
//!
//! [`OrbitCamera`] keeps yaw, pitch, zoom and a smoothing velocity across
//! ticks. Each tick it turns from pointer input, probes for occluders with a
//! swept sphere through [`CollisionQuery`](vantage_physics::CollisionQuery),
//! and eases toward the resolved position. Run it after the physics phase so
//! it reads the character's settled position.

pub mod config;
pub mod orbit;

pub use config::OrbitConfig;
pub use orbit::{clamp_collision_distance, OrbitCamera, OrbitFrame, PointerInput};
