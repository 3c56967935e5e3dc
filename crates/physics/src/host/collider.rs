//! Reference kinematic capsule collider.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{step_slide_move, CollisionWorld, LayerMask, SlideSettings, TraceShape};
use crate::error::{ensure_ordered, ensure_positive, ensure_within, ConfigError};

use super::CharacterCollider;

/// Collider dimensions and sweep tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    pub radius: f32,
    pub height: f32,
    /// Capsule center relative to the feet.
    pub center: Vec3,
    /// Tallest ledge climbed without jumping.
    pub step_offset: f32,
    /// Steepest walkable slope in degrees.
    pub slope_limit: f32,
    pub mask: LayerMask,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            center: Vec3::new(0.0, 1.0, 0.0),
            step_offset: 0.3,
            slope_limit: 45.0,
            mask: LayerMask::MOVEMENT_BLOCKING,
        }
    }
}

impl ColliderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("collider.radius", self.radius)?;
        ensure_positive("collider.height", self.height)?;
        ensure_ordered("collider.radius * 2", self.radius * 2.0, "collider.height", self.height)?;
        ensure_within("collider.step_offset", self.step_offset, 0.0, self.height)?;
        ensure_within("collider.slope_limit", self.slope_limit, 0.0, 90.0)?;
        if !self.center.is_finite() {
            return Err(ConfigError::NonFinite { field: "collider.center" });
        }
        Ok(())
    }

    fn slide_settings(&self) -> SlideSettings {
        SlideSettings {
            step_offset: self.step_offset,
            min_ground_normal: self.slope_limit.to_radians().cos(),
            mask: self.mask,
            ..SlideSettings::default()
        }
    }
}

/// A capsule moved by explicit displacements.
///
/// The collider itself holds no world reference; bind it to one for a tick
/// with [`attach`](Self::attach).
#[derive(Debug, Clone)]
pub struct KinematicCollider {
    position: Vec3,
    radius: f32,
    height: f32,
    center: Vec3,
    settings: SlideSettings,
    /// Displacement applied since the last `end_tick`.
    moved: Vec3,
    velocity: Vec3,
}

impl KinematicCollider {
    pub fn new(config: &ColliderConfig, position: Vec3) -> Self {
        Self {
            position,
            radius: config.radius,
            height: config.height,
            center: config.center,
            settings: config.slide_settings(),
            moved: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }

    /// Bind to a world so the collider can be swept.
    pub fn attach<'a>(&'a mut self, world: &'a CollisionWorld) -> AttachedCollider<'a> {
        AttachedCollider { collider: self, world }
    }

    /// Place the collider without sweeping. Clears the velocity.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.moved = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The swept shape, and the offset from the transform to its base.
    ///
    /// The base never sits below the transform, even when the capsule is
    /// stretched to its minimum height of one diameter.
    fn shape(&self) -> (TraceShape, Vec3) {
        let height = self.height.max(self.radius * 2.0);
        let mut base = self.center - Vec3::new(0.0, height / 2.0, 0.0);
        base.y = base.y.max(0.0);
        (
            TraceShape::Capsule {
                radius: self.radius,
                height,
            },
            base,
        )
    }
}

/// A [`KinematicCollider`] bound to a world for the duration of a tick.
pub struct AttachedCollider<'a> {
    collider: &'a mut KinematicCollider,
    world: &'a CollisionWorld,
}

impl CharacterCollider for AttachedCollider<'_> {
    fn position(&self) -> Vec3 {
        self.collider.position
    }

    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        if !displacement.is_finite() || displacement.length_squared() < 1.0e-12 {
            return Vec3::ZERO;
        }

        let (shape, base) = self.collider.shape();
        let start = self.collider.position + base;
        let result = step_slide_move(self.world, start, displacement, shape, &self.collider.settings);

        let actual = result.position - start;
        self.collider.position += actual;
        self.collider.moved += actual;
        actual
    }

    fn velocity(&self) -> Vec3 {
        self.collider.velocity
    }

    fn end_tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.collider.velocity = self.collider.moved / dt;
        }
        self.collider.moved = Vec3::ZERO;
    }

    fn height(&self) -> f32 {
        self.collider.height
    }

    fn set_height(&mut self, height: f32) {
        if height.is_finite() && height > 0.0 {
            self.collider.height = height;
        }
    }

    fn center(&self) -> Vec3 {
        self.collider.center
    }

    fn set_center(&mut self, center: Vec3) {
        if center.is_finite() {
            self.collider.center = center;
        }
    }

    fn radius(&self) -> f32 {
        self.collider.radius
    }
}
