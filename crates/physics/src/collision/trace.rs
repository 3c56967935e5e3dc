//! Trace results and query shapes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::layers::LayerMask;

/// Result of sweeping a shape from a start to an end position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the path the shape got before touching something.
    ///
    /// - `1.0` = traveled the full distance
    /// - `0.0` = blocked immediately
    pub fraction: f32,

    /// Final position of the shape's origin.
    pub end_position: Vec3,

    /// Surface normal at the impact, pointing away from the surface.
    /// `None` when nothing was hit.
    pub hit_normal: Option<Vec3>,

    /// Layers of the collider that stopped the trace.
    pub hit_layers: LayerMask,

    /// Whether the shape already overlapped geometry at the start.
    pub started_in_solid: bool,

    /// Whether the shape could not move at all.
    pub all_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// A trace that traveled the whole way.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_layers: LayerMask::NONE,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// A trace stopped part of the way.
    pub fn hit(fraction: f32, end_position: Vec3, normal: Vec3, layers: LayerMask) -> Self {
        Self {
            fraction,
            end_position,
            hit_normal: Some(normal),
            hit_layers: layers,
            started_in_solid: false,
            all_solid: false,
        }
    }

    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }

    /// Get the hit normal, defaulting to up if none.
    #[inline]
    pub fn normal_or_up(&self) -> Vec3 {
        self.hit_normal.unwrap_or(Vec3::Y)
    }
}

/// Nearest hit of a swept sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    /// Distance the sphere center traveled before touching the surface.
    pub distance: f32,
    /// Surface normal at the contact, pointing back toward the sphere.
    pub normal: Vec3,
    /// Id of the collider that was hit.
    pub collider: u32,
}

/// Shape used for sweeps and overlap tests.
///
/// Capsules are placed by the center of their bottom cap's lowest point
/// (the "feet"), spheres by their center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// An upright capsule.
    Capsule {
        /// Radius of the cylinder and end caps.
        radius: f32,
        /// Total height from the bottom of the lower cap to the top of the upper cap.
        height: f32,
    },

    /// A sphere.
    Sphere { radius: f32 },
}

impl TraceShape {
    /// Effective horizontal radius.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Capsule { radius, .. } | Self::Sphere { radius } => *radius,
        }
    }

    /// Total vertical extent.
    pub fn height(&self) -> f32 {
        match self {
            Self::Capsule { height, .. } => *height,
            Self::Sphere { radius } => radius * 2.0,
        }
    }

    /// Offset from the placement origin to the geometric center.
    pub fn center_offset(&self) -> Vec3 {
        match self {
            Self::Capsule { height, .. } => Vec3::new(0.0, height / 2.0, 0.0),
            Self::Sphere { .. } => Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_result_no_hit() {
        let result = TraceResult::no_hit(Vec3::new(10.0, 0.0, 0.0));
        assert!(!result.hit_something());
        assert_eq!(result.normal_or_up(), Vec3::Y);
    }

    #[test]
    fn test_trace_result_hit() {
        let result = TraceResult::hit(0.5, Vec3::new(5.0, 0.0, 0.0), Vec3::X, LayerMask::OBSTACLE);
        assert!(result.hit_something());
        assert_eq!(result.hit_normal, Some(Vec3::X));
        assert_eq!(result.hit_layers, LayerMask::OBSTACLE);
    }

    #[test]
    fn test_capsule_is_placed_by_its_feet() {
        let capsule = TraceShape::Capsule { radius: 0.5, height: 2.0 };
        assert_eq!(capsule.center_offset(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(TraceShape::Sphere { radius: 0.3 }.center_offset(), Vec3::ZERO);
        assert_eq!(capsule.height(), 2.0);
    }
}
