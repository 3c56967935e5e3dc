//! Level geometry and spawn points.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use vantage_physics::{CollisionWorld, LayerMask};

/// A level: static collision geometry plus spawn points.
#[derive(Debug)]
pub struct Level {
    pub id: String,

    pub name: String,

    pub collision: CollisionWorld,

    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a character enters the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Feet position in world space.
    pub position: Vec3,

    /// Initial facing in degrees.
    pub facing: f32,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A small walled yard for development and tests.
    ///
    /// Layout (top view, +Z up the page):
    ///
    /// ```text
    ///  +----------------------------+  z = 20
    ///  |        [crawlspace]        |
    ///  |                     /ramp  |
    ///  |   [pillar]      [step]     |
    ///  |                            |
    ///  |            S               |  spawn at the origin
    ///  +----------------------------+  z = -20
    /// ```
    pub fn test_arena() -> Self {
        let mut level = Self::new("test_arena", "Test Arena");
        let world = &mut level.collision;

        // Floor, top face at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(20.0, 0.5, 20.0),
            LayerMask::GROUND,
        );

        // Perimeter walls
        for (center, half) in [
            (Vec3::new(0.0, 2.0, 20.5), Vec3::new(21.0, 2.0, 0.5)),
            (Vec3::new(0.0, 2.0, -20.5), Vec3::new(21.0, 2.0, 0.5)),
            (Vec3::new(20.5, 2.0, 0.0), Vec3::new(0.5, 2.0, 21.0)),
            (Vec3::new(-20.5, 2.0, 0.0), Vec3::new(0.5, 2.0, 21.0)),
        ] {
            world.add_box(center, half, LayerMask::OBSTACLE);
        }

        // Pillar
        world.add_box(
            Vec3::new(-6.0, 2.0, 6.0),
            Vec3::new(1.0, 2.0, 1.0),
            LayerMask::OBSTACLE,
        );

        // Low step, climbable without jumping
        world.add_box(
            Vec3::new(6.0, 0.1, 6.0),
            Vec3::new(2.0, 0.1, 2.0),
            LayerMask::GROUND,
        );

        // Ramp rising toward +Z at 20 degrees
        world.add_oriented_box(
            Vec3::new(12.0, 0.5, 10.0),
            Vec3::new(2.0, 0.25, 4.0),
            Quat::from_rotation_x(-20f32.to_radians()),
            LayerMask::GROUND,
        );

        // Crawlspace: a slab with its underside at 1.5, too low to stand in
        world.add_box(
            Vec3::new(0.0, 1.75, 15.0),
            Vec3::new(3.0, 0.25, 3.0),
            LayerMask::OBSTACLE,
        );

        level.spawn_points.push(SpawnPoint {
            position: Vec3::ZERO,
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-3.0, 0.0, -3.0),
            facing: 45.0,
        });

        level
    }

    pub fn spawn_point_count(&self) -> usize {
        self.spawn_points.len()
    }

    pub fn spawn_point(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_physics::TraceShape;

    #[test]
    fn test_arena_has_geometry_and_spawns() {
        let level = Level::test_arena();
        assert_eq!(level.collision.len(), 9);
        assert_eq!(level.spawn_point_count(), 2);
    }

    #[test]
    fn test_spawn_points_are_clear() {
        let level = Level::test_arena();
        let standing = TraceShape::Capsule { radius: 0.5, height: 2.0 };

        for spawn in &level.spawn_points {
            assert!(!level
                .collision
                .overlaps(spawn.position, standing, LayerMask::MOVEMENT_BLOCKING));
        }
    }

    #[test]
    fn test_crawlspace_fits_only_crouched() {
        let level = Level::test_arena();
        let feet = Vec3::new(0.0, 0.0, 15.0);

        let standing = TraceShape::Capsule { radius: 0.5, height: 2.0 };
        let crouched = TraceShape::Capsule { radius: 0.5, height: 1.0 };

        assert!(level.collision.overlaps(feet, standing, LayerMask::MOVEMENT_BLOCKING));
        assert!(!level.collision.overlaps(feet, crouched, LayerMask::MOVEMENT_BLOCKING));
    }
}
