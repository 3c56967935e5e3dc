//! Third-person orbit camera.
//!
//! The rig orbits an anchor above its target. Pointer motion turns it, the
//! scroll wheel zooms, and a swept sphere pulls it in front of anything
//! between the anchor and the desired position. Position is smoothed with a
//! critically damped spring; orientation follows yaw and pitch directly.

use glam::{EulerRot, Quat, Vec3};

use vantage_physics::host::CollisionQuery;
use vantage_physics::movement::CameraBasis;
use vantage_physics::smoothing::{smooth_damp_vec3, wrap_degrees};

use crate::config::OrbitConfig;

/// Pointer input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Horizontal pointer delta, positive turns right.
    pub delta_x: f32,
    /// Vertical pointer delta, positive looks up.
    pub delta_y: f32,
    /// Scroll delta, positive zooms in.
    pub scroll: f32,
}

impl PointerInput {
    pub fn new(delta_x: f32, delta_y: f32, scroll: f32) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            delta_x: finite(delta_x),
            delta_y: finite(delta_y),
            scroll: finite(scroll),
        }
    }
}

/// Distances resolved by one camera tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitFrame {
    pub anchor: Vec3,
    /// Distance allowed by the occlusion probe.
    pub collision_distance: f32,
    /// Distance actually used: the lesser of collision and zoom.
    pub final_distance: f32,
    /// Position the camera is being smoothed toward.
    pub desired_position: Vec3,
    pub occluded: bool,
}

/// Orbit camera rig state.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub config: OrbitConfig,
    yaw: f32,
    pitch: f32,
    /// Zoom distance kept across ticks.
    requested_distance: f32,
    /// Distance used by the last tick.
    current_distance: f32,
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    occluded: bool,
}

impl OrbitCamera {
    /// A rig at the origin looking along +Z with the configured pitch.
    pub fn new(config: OrbitConfig) -> Self {
        Self::from_pose(config, Vec3::ZERO, 0.0, f32::NAN)
    }

    /// A rig starting from an existing pose. A non-finite pitch falls back
    /// to the configured initial pitch.
    pub fn from_pose(config: OrbitConfig, position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            requested_distance: config.distance,
            current_distance: config.distance,
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            occluded: false,
            config,
        };
        camera.reset(yaw, pitch);
        camera
    }

    /// Reinitialize the rig: angles, zoom and smoothing start over.
    pub fn reset(&mut self, yaw: f32, pitch: f32) {
        let pitch = if pitch.is_finite() { pitch } else { self.config.initial_pitch };
        self.yaw = if yaw.is_finite() { wrap_degrees(yaw) } else { 0.0 };
        self.pitch = pitch.clamp(self.config.pitch_min, self.config.pitch_max);
        self.requested_distance = self.config.distance;
        self.current_distance = self.config.distance;
        self.velocity = Vec3::ZERO;
        self.occluded = false;
        self.rotation = self.orientation();
    }

    /// Place the camera at its desired position for `target` without smoothing.
    pub fn snap_to(&mut self, target: Vec3, query: &impl CollisionQuery) {
        let anchor = target + self.config.target_offset;
        let collision = self.probe(anchor, query).0;
        let distance = collision.min(self.requested_distance);
        self.current_distance = distance;
        self.position = anchor + self.back() * distance;
        self.velocity = Vec3::ZERO;
    }

    /// Run one camera tick.
    ///
    /// Without a target the camera holds its pose and returns `None`.
    pub fn update(
        &mut self,
        target: Option<Vec3>,
        input: &PointerInput,
        query: &impl CollisionQuery,
        dt: f32,
    ) -> Option<OrbitFrame> {
        let target = target.filter(|t| t.is_finite())?;
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        // Angles
        self.yaw = wrap_degrees(self.yaw + input.delta_x * self.config.sensitivity_x * dt);
        self.pitch = (self.pitch - input.delta_y * self.config.sensitivity_y * dt)
            .clamp(self.config.pitch_min, self.config.pitch_max);

        let anchor = target + self.config.target_offset;
        self.rotation = self.orientation();

        // Occlusion
        let (collision_distance, occluded) = self.probe(anchor, query);
        if occluded != self.occluded {
            log::trace!(
                "camera occlusion {} (distance {:.2})",
                if occluded { "began" } else { "cleared" },
                collision_distance
            );
            self.occluded = occluded;
        }

        // Zoom
        self.requested_distance = (self.requested_distance - input.scroll * self.config.zoom_speed)
            .clamp(self.config.min_distance, self.config.max_distance);

        let final_distance = collision_distance.min(self.requested_distance);
        self.current_distance = final_distance;

        let desired_position = anchor + self.back() * final_distance;
        self.position = smooth_damp_vec3(
            self.position,
            desired_position,
            &mut self.velocity,
            self.config.smooth_time,
            dt,
        );

        Some(OrbitFrame {
            anchor,
            collision_distance,
            final_distance,
            desired_position,
            occluded,
        })
    }

    /// Sweep from the anchor toward the back vector.
    fn probe(&self, anchor: Vec3, query: &impl CollisionQuery) -> (f32, bool) {
        let reach = self.config.distance + self.config.radius;
        match query.sphere_cast(anchor, self.config.radius, self.back(), reach, self.config.collision_mask) {
            Some(hit) => (
                clamp_collision_distance(hit, self.config.collision_offset, self.config.min_distance),
                true,
            ),
            None => (self.config.distance, false),
        }
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), self.pitch.to_radians(), 0.0)
    }

    fn back(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Distance used by the last tick.
    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Persistent zoom distance.
    pub fn requested_distance(&self) -> f32 {
        self.requested_distance
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Planar basis for camera-relative movement input.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_rotation(self.rotation)
    }
}

/// Distance allowed by a probe hit: back off by `offset`, never below `min`.
pub fn clamp_collision_distance(hit: f32, offset: f32, min: f32) -> f32 {
    (hit - offset).max(min)
}
