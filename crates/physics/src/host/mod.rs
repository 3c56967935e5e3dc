//! Capabilities the motion models consume from the host.
//!
//! The models never own a physics engine. They talk to one through these
//! traits, so any engine that can answer sphere queries and sweep a capsule
//! can drive them. [`CollisionWorld`], [`KinematicCollider`] and
//! [`DynamicBody`] are the reference implementations used by the game crate
//! and the tests.

mod body;
mod collider;

use glam::Vec3;

use crate::collision::{CollisionWorld, LayerMask, TraceShape};

pub use body::{BodyConfig, DynamicBody};
pub use collider::{AttachedCollider, ColliderConfig, KinematicCollider};

/// Read-only queries against the collision world.
pub trait CollisionQuery {
    /// Whether a sphere touches anything in `mask`.
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;

    /// Distance to the first surface a swept sphere touches.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32>;

    /// Whether an upright capsule standing at `feet` penetrates anything in `mask`.
    fn overlaps_capsule(&self, feet: Vec3, radius: f32, height: f32, mask: LayerMask) -> bool;
}

impl CollisionQuery for CollisionWorld {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        CollisionWorld::check_sphere(self, center, radius, mask)
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        CollisionWorld::sphere_cast(self, origin, radius, direction, max_distance, mask).map(|hit| hit.distance)
    }

    fn overlaps_capsule(&self, feet: Vec3, radius: f32, height: f32, mask: LayerMask) -> bool {
        self.overlaps(feet, TraceShape::Capsule { radius, height }, mask)
    }
}

/// A kinematic character collider: swept by explicit displacements.
pub trait CharacterCollider {
    /// Position of the collider's transform (the character's feet).
    fn position(&self) -> Vec3;

    /// Sweep by `displacement`, resolving collisions. Returns the actual
    /// displacement applied.
    fn move_by(&mut self, displacement: Vec3) -> Vec3;

    /// Velocity over the last completed tick.
    fn velocity(&self) -> Vec3;

    /// Close the tick: derive [`velocity`](Self::velocity) from everything
    /// moved since the previous call.
    fn end_tick(&mut self, dt: f32);

    fn height(&self) -> f32;

    fn set_height(&mut self, height: f32);

    /// Capsule center relative to the transform.
    fn center(&self) -> Vec3;

    fn set_center(&mut self, center: Vec3);

    fn radius(&self) -> f32;
}

/// A dynamic body driven by forces.
pub trait RigidBody {
    /// Add a force for the current tick.
    fn apply_force(&mut self, force: Vec3);
}

#[cfg(test)]
pub(crate) mod tests_support {
    use glam::Vec3;

    use super::CharacterCollider;

    /// Collider without any world: every move succeeds and is recorded.
    #[derive(Debug, Clone)]
    pub struct RecordingCollider {
        pub position: Vec3,
        pub moves: Vec<Vec3>,
        pub height: f32,
        pub center: Vec3,
        pub moved: Vec3,
        pub velocity: Vec3,
    }

    impl Default for RecordingCollider {
        fn default() -> Self {
            Self {
                position: Vec3::ZERO,
                moves: Vec::new(),
                height: 2.0,
                center: Vec3::new(0.0, 1.0, 0.0),
                moved: Vec3::ZERO,
                velocity: Vec3::ZERO,
            }
        }
    }

    impl CharacterCollider for RecordingCollider {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn move_by(&mut self, displacement: Vec3) -> Vec3 {
            self.moves.push(displacement);
            self.position += displacement;
            self.moved += displacement;
            displacement
        }

        fn velocity(&self) -> Vec3 {
            self.velocity
        }

        fn end_tick(&mut self, dt: f32) {
            if dt > 0.0 {
                self.velocity = self.moved / dt;
            }
            self.moved = Vec3::ZERO;
        }

        fn height(&self) -> f32 {
            self.height
        }

        fn set_height(&mut self, height: f32) {
            self.height = height;
        }

        fn center(&self) -> Vec3 {
            self.center
        }

        fn set_center(&mut self, center: Vec3) {
            self.center = center;
        }

        fn radius(&self) -> f32 {
            0.5
        }
    }
}
