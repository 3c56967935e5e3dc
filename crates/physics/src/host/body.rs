//! Reference dynamic body: a sphere integrated from accumulated forces.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{slide_move, CollisionWorld, LayerMask, SlideSettings, TraceShape};
use crate::error::{ensure_positive, ensure_within, ConfigError};

use super::RigidBody;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub mass: f32,
    pub radius: f32,
    /// Linear damping per second.
    pub drag: f32,
    pub mask: LayerMask,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            radius: 0.5,
            drag: 0.0,
            mask: LayerMask::MOVEMENT_BLOCKING,
        }
    }
}

impl BodyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("body.mass", self.mass)?;
        ensure_positive("body.radius", self.radius)?;
        ensure_within("body.drag", self.drag, 0.0, f32::MAX)
    }
}

/// A sphere body that integrates forces, gravity and collision once per tick.
#[derive(Debug, Clone)]
pub struct DynamicBody {
    position: Vec3,
    velocity: Vec3,
    mass: f32,
    radius: f32,
    drag: f32,
    settings: SlideSettings,
    /// Force accumulated since the last integration.
    force: Vec3,
}

impl DynamicBody {
    pub fn new(config: &BodyConfig, position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass: config.mass,
            radius: config.radius,
            drag: config.drag,
            settings: SlideSettings {
                step_offset: 0.0,
                mask: config.mask,
                ..SlideSettings::default()
            },
            force: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Force waiting for the next [`integrate`](Self::integrate).
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Advance one tick: semi-implicit Euler, then slide through the world.
    ///
    /// Velocity going into any surface touched is removed. The force
    /// accumulator is cleared.
    pub fn integrate(&mut self, world: &CollisionWorld, gravity: Vec3, dt: f32) {
        let force = std::mem::take(&mut self.force);
        if !(dt > 0.0) {
            return;
        }

        let acceleration = force / self.mass + gravity;
        self.velocity += acceleration * dt;
        if self.drag > 0.0 {
            self.velocity *= 1.0 / (1.0 + self.drag * dt);
        }

        let shape = TraceShape::Sphere { radius: self.radius };
        let result = slide_move(world, self.position, self.velocity * dt, shape, &self.settings);
        self.position = result.position;

        if let Some(normal) = result.last_normal {
            let into = self.velocity.dot(normal);
            if into < 0.0 {
                self.velocity -= normal * into;
            }
        }
    }
}

impl RigidBody for DynamicBody {
    fn apply_force(&mut self, force: Vec3) {
        if force.is_finite() {
            self.force += force;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

    fn floor() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            LayerMask::GROUND,
        );
        world
    }

    #[test]
    fn test_body_rests_on_floor() {
        let world = floor();
        let mut body = DynamicBody::new(&BodyConfig::default(), Vec3::new(0.0, 2.0, 0.0));

        for _ in 0..200 {
            body.integrate(&world, GRAVITY, 0.02);
        }

        assert!((body.position().y - 0.5).abs() < 0.02, "y={}", body.position().y);
        assert!(body.velocity().y.abs() < 0.5);
    }

    #[test]
    fn test_force_accelerates_and_clears() {
        let world = CollisionWorld::new();
        let mut body = DynamicBody::new(&BodyConfig::default(), Vec3::ZERO);

        body.apply_force(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(body.pending_force(), Vec3::new(10.0, 0.0, 0.0));

        body.integrate(&world, Vec3::ZERO, 0.1);
        assert!((body.velocity().x - 1.0).abs() < 1e-5);
        assert_eq!(body.pending_force(), Vec3::ZERO);

        // Velocity persists without force
        body.integrate(&world, Vec3::ZERO, 0.1);
        assert!((body.velocity().x - 1.0).abs() < 1e-5);
        assert!((body.position().x - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_force_is_dropped() {
        let mut body = DynamicBody::new(&BodyConfig::default(), Vec3::ZERO);
        body.apply_force(Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert_eq!(body.pending_force(), Vec3::ZERO);
    }
}
