//! Ground contact sensing.

use glam::Vec3;

use crate::collision::LayerMask;
use crate::host::CollisionQuery;

use super::config::LocomotionConfig;

/// Sphere probe below the character's feet.
///
/// The probe rides on an anchor offset from the character's position. With
/// no anchor the sensor reports "not grounded" instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundSensor {
    anchor: Option<Vec3>,
    radius: f32,
    mask: LayerMask,
}

impl GroundSensor {
    pub fn new(anchor: Option<Vec3>, radius: f32, mask: LayerMask) -> Self {
        Self { anchor, radius, mask }
    }

    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self::new(Some(config.ground_check_offset), config.ground_distance, config.ground_mask)
    }

    /// Replace or remove the probe anchor.
    pub fn set_anchor(&mut self, anchor: Option<Vec3>) {
        self.anchor = anchor;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World-space probe center for a character standing at `position`.
    pub fn probe_point(&self, position: Vec3) -> Option<Vec3> {
        self.anchor.map(|offset| position + offset)
    }

    /// Whether ground lies within the probe sphere.
    pub fn check(&self, query: &impl CollisionQuery, position: Vec3) -> bool {
        probe(query, self.probe_point(position), self.radius, self.mask)
    }
}

/// Sphere overlap against `mask`. An undefined point is never grounded.
pub fn probe(query: &impl CollisionQuery, point: Option<Vec3>, radius: f32, mask: LayerMask) -> bool {
    match point {
        Some(point) if point.is_finite() => query.check_sphere(point, radius, mask),
        _ => false,
    }
}
