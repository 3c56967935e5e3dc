//! Orbit camera configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use vantage_physics::error::{ensure_ordered, ensure_positive, ensure_within, ConfigError};
use vantage_physics::LayerMask;

/// Configuration for the orbit camera.
///
/// Distances are meters, angles degrees, sensitivities degrees per second
/// per unit of pointer delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    // ========================================================================
    // Orbit
    // ========================================================================
    /// Offset from the target position to the orbit anchor (eye height).
    pub target_offset: Vec3,

    /// Base orbit distance, also the reach of the occlusion probe.
    pub distance: f32,

    pub min_distance: f32,

    pub max_distance: f32,

    pub sensitivity_x: f32,

    pub sensitivity_y: f32,

    /// Position smoothing time (seconds).
    pub smooth_time: f32,

    pub pitch_min: f32,

    pub pitch_max: f32,

    /// Pitch on (re)initialization.
    pub initial_pitch: f32,

    /// Distance change per unit of scroll.
    pub zoom_speed: f32,

    // ========================================================================
    // Collision
    // ========================================================================
    /// Radius of the occlusion probe sphere.
    pub radius: f32,

    /// Gap kept between the camera and an occluding surface.
    pub collision_offset: f32,

    pub collision_mask: LayerMask,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target_offset: Vec3::new(0.0, 1.6, 0.0),
            distance: 3.5,
            min_distance: 1.5,
            max_distance: 5.5,
            sensitivity_x: 120.0,
            sensitivity_y: 90.0,
            smooth_time: 0.05,
            pitch_min: -35.0,
            pitch_max: 60.0,
            initial_pitch: 10.0,
            zoom_speed: 2.0,

            radius: 0.3,
            collision_offset: 0.2,
            collision_mask: LayerMask::CAMERA_BLOCKING,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_offset.is_finite() {
            return Err(ConfigError::NonFinite { field: "camera.target_offset" });
        }
        ensure_positive("camera.min_distance", self.min_distance)?;
        ensure_ordered(
            "camera.min_distance",
            self.min_distance,
            "camera.max_distance",
            self.max_distance,
        )?;
        ensure_within("camera.distance", self.distance, self.min_distance, self.max_distance)?;

        ensure_ordered("camera.pitch_min", self.pitch_min, "camera.pitch_max", self.pitch_max)?;
        ensure_within("camera.pitch_min", self.pitch_min, -90.0, 90.0)?;
        ensure_within("camera.pitch_max", self.pitch_max, -90.0, 90.0)?;
        ensure_within("camera.initial_pitch", self.initial_pitch, self.pitch_min, self.pitch_max)?;

        ensure_within("camera.sensitivity_x", self.sensitivity_x, 0.0, f32::MAX)?;
        ensure_within("camera.sensitivity_y", self.sensitivity_y, 0.0, f32::MAX)?;
        ensure_positive("camera.smooth_time", self.smooth_time)?;
        ensure_within("camera.zoom_speed", self.zoom_speed, 0.0, f32::MAX)?;

        ensure_positive("camera.radius", self.radius)?;
        ensure_within("camera.collision_offset", self.collision_offset, 0.0, self.distance)
    }
}
