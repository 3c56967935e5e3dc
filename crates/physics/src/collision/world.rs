//! Collision world containing the static level geometry.
//!
//! The world is immutable while a tick runs; every query here takes `&self`.

use glam::{Quat, Vec3};
use parry3d::math::{Isometry, Real};
use parry3d::na::{Quaternion, Translation3, UnitQuaternion};
use parry3d::query::{contact, Contact};
use parry3d::shape::SharedShape;

use super::layers::LayerMask;
use super::trace::{SphereHit, TraceResult, TraceShape};

/// Penetration depth tolerated before a shape counts as overlapping.
///
/// Without it a capsule resting exactly on a floor would be "in solid" and
/// every sweep starting from there would be blocked.
pub const CONTACT_SKIN: f32 = 0.001;

/// Smallest step used when marching a sweep.
const MIN_SWEEP_STEP: f32 = 0.02;

/// Upper bound on marching samples per sweep.
const MAX_SWEEP_STEPS: usize = 512;

/// Bisection iterations after the first blocked sample (~0.025% precision).
const REFINE_ITERATIONS: usize = 12;

/// A piece of static collision geometry.
#[derive(Clone)]
pub struct StaticCollider {
    /// Unique identifier within its world.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

impl std::fmt::Debug for StaticCollider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCollider")
            .field("id", &self.id)
            .field("translation", &self.transform.translation.vector)
            .field("layers", &self.layers)
            .finish()
    }
}

/// The collision world.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<StaticCollider>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size in each axis
    /// * `layers` - Layers used for query filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layers: LayerMask) -> u32 {
        self.add_oriented_box(center, half_extents, Quat::IDENTITY, layers)
    }

    /// Add a rotated box (ramps, tilted props).
    pub fn add_oriented_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        layers: LayerMask,
    ) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        self.push(shape, to_isometry(center, rotation), layers)
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, layers: LayerMask) -> u32 {
        self.push(SharedShape::ball(radius), to_isometry(center, Quat::IDENTITY), layers)
    }

    fn push(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: LayerMask) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.colliders.push(StaticCollider {
            id,
            shape,
            transform,
            layers,
        });
        id
    }

    /// Remove a collider by id. Returns whether it existed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check whether a sphere touches any collider in `mask`.
    ///
    /// Touching counts, so a ground probe resting on a floor reports contact.
    pub fn check_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
            return false;
        }
        let ball = SharedShape::ball(radius.max(f32::EPSILON));
        let placement = to_isometry(center, Quat::IDENTITY);

        self.filtered(mask)
            .any(|collider| matches!(contact_with(collider, &placement, &ball, 0.0), Some(c) if c.dist <= 0.0))
    }

    /// Check whether a shape placed at `position` penetrates geometry in `mask`
    /// deeper than [`CONTACT_SKIN`].
    pub fn overlaps(&self, position: Vec3, shape: TraceShape, mask: LayerMask) -> bool {
        let test_shape = parry_shape(shape);
        let placement = shape_isometry(position, shape);

        self.filtered(mask).any(|collider| penetrates(collider, &placement, &test_shape))
    }

    /// Sweep a sphere and return the nearest hit.
    ///
    /// Colliders already touching the sphere at `origin` are ignored, so a
    /// probe starting inside a volume can still find what lies beyond it.
    pub fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SphereHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || !origin.is_finite() || !(max_distance > 0.0) {
            return None;
        }

        let radius = radius.max(f32::EPSILON);
        let ball = SharedShape::ball(radius);
        let step = (radius * 0.5).max(MIN_SWEEP_STEP);
        let steps = ((max_distance / step).ceil() as usize).clamp(1, MAX_SWEEP_STEPS);

        let touches = |collider: &StaticCollider, distance: f32| {
            let placement = to_isometry(origin + direction * distance, Quat::IDENTITY);
            matches!(contact_with(collider, &placement, &ball, 0.0), Some(c) if c.dist <= 0.0)
        };

        let mut nearest: Option<SphereHit> = None;

        for collider in self.filtered(mask) {
            if touches(collider, 0.0) {
                continue;
            }

            let Some((mut free, mut blocked)) = first_blocked(steps, max_distance, |d| touches(collider, d)) else {
                continue;
            };

            for _ in 0..REFINE_ITERATIONS {
                let mid = (free + blocked) * 0.5;
                if touches(collider, mid) {
                    blocked = mid;
                } else {
                    free = mid;
                }
            }

            if nearest.is_some_and(|hit| hit.distance <= free) {
                continue;
            }

            let placement = to_isometry(origin + direction * blocked, Quat::IDENTITY);
            let normal = contact_with(collider, &placement, &ball, CONTACT_SKIN)
                .map(|c| -Vec3::new(c.normal1.x, c.normal1.y, c.normal1.z))
                .unwrap_or(-direction);

            nearest = Some(SphereHit {
                distance: free,
                normal,
                collider: collider.id,
            });
        }

        nearest
    }

    /// Trace a shape from `start` to `end`.
    ///
    /// The path is sampled at intervals of half the shape's radius, widened
    /// when the sweep would need more than `MAX_SWEEP_STEPS` samples. The
    /// first blocked interval is refined by bisection.
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: LayerMask) -> TraceResult {
        let delta = end - start;
        let distance = delta.length();

        // No movement - just check if position is valid
        if distance < 0.0001 {
            return if self.overlaps(start, shape, mask) {
                TraceResult {
                    fraction: 0.0,
                    end_position: start,
                    hit_normal: Some(Vec3::Y),
                    hit_layers: mask,
                    started_in_solid: true,
                    all_solid: true,
                }
            } else {
                TraceResult::no_hit(start)
            };
        }

        let started_in_solid = self.overlaps(start, shape, mask);
        let step = (shape.radius() * 0.5).max(MIN_SWEEP_STEP);
        let steps = ((distance / step).ceil() as usize).clamp(1, MAX_SWEEP_STEPS);

        let blocked_at = |t: f32| self.overlaps(start + delta * t, shape, mask);

        let Some((mut lo, mut hi)) = first_blocked(steps, 1.0, |t| blocked_at(t)) else {
            return TraceResult {
                started_in_solid,
                ..TraceResult::no_hit(end)
            };
        };

        for _ in 0..REFINE_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            if blocked_at(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let end_position = start + delta * lo;

        // Hit normal from the direction that resolves the penetration
        let penetrating = start + delta * hi;
        let (push, layers) = self.penetration_push(penetrating, shape, mask);
        let hit_normal = if push.length_squared() > 1.0e-8 {
            push.normalize()
        } else {
            let back = Vec3::new(-delta.x, 0.0, -delta.z);
            if back.length_squared() > 1.0e-6 {
                back.normalize()
            } else {
                -delta.normalize()
            }
        };

        TraceResult {
            fraction: lo,
            end_position,
            hit_normal: Some(hit_normal),
            hit_layers: layers,
            started_in_solid,
            all_solid: started_in_solid && lo < 0.001,
        }
    }

    /// Push a shape out of any geometry it penetrates.
    ///
    /// Returns the corrected position.
    pub fn resolve_penetration(&self, position: Vec3, shape: TraceShape, mask: LayerMask) -> Vec3 {
        position + self.penetration_push(position, shape, mask).0
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn filtered(&self, mask: LayerMask) -> impl Iterator<Item = &StaticCollider> {
        self.colliders
            .iter()
            .filter(move |collider| mask.intersects(collider.layers))
    }

    fn penetration_push(&self, position: Vec3, shape: TraceShape, mask: LayerMask) -> (Vec3, LayerMask) {
        let test_shape = parry_shape(shape);
        let placement = shape_isometry(position, shape);

        let mut correction = Vec3::ZERO;
        let mut layers = LayerMask::NONE;

        for collider in self.filtered(mask) {
            if let Some(c) = contact_with(collider, &placement, &test_shape, 0.0) {
                let depth = -c.dist;
                if depth > CONTACT_SKIN {
                    // normal1 points from the shape toward the collider
                    let away = -Vec3::new(c.normal1.x, c.normal1.y, c.normal1.z);
                    correction += away * (depth + CONTACT_SKIN);
                    layers = layers | collider.layers;
                }
            }
        }

        (correction, layers)
    }
}

/// Walk `steps` evenly spaced samples over `(0, length]` and return the last
/// free and first blocked sample.
fn first_blocked(steps: usize, length: f32, mut blocked: impl FnMut(f32) -> bool) -> Option<(f32, f32)> {
    let mut free = 0.0;
    for i in 1..=steps {
        let sample = length * i as f32 / steps as f32;
        if blocked(sample) {
            return Some((free, sample));
        }
        free = sample;
    }
    None
}

fn penetrates(collider: &StaticCollider, placement: &Isometry<Real>, shape: &SharedShape) -> bool {
    matches!(contact_with(collider, placement, shape, 0.0), Some(c) if c.dist < -CONTACT_SKIN)
}

fn contact_with(
    collider: &StaticCollider,
    placement: &Isometry<Real>,
    shape: &SharedShape,
    prediction: f32,
) -> Option<Contact> {
    contact(
        placement,
        shape.as_ref(),
        &collider.transform,
        collider.shape.as_ref(),
        prediction,
    )
    .ok()
    .flatten()
}

fn parry_shape(shape: TraceShape) -> SharedShape {
    match shape {
        TraceShape::Capsule { radius, height } => {
            // Parry capsules are defined by the half-height of the cylinder part
            let cylinder_half_height = (height - 2.0 * radius).max(0.0) / 2.0;
            SharedShape::capsule_y(cylinder_half_height, radius)
        }
        TraceShape::Sphere { radius } => SharedShape::ball(radius.max(f32::EPSILON)),
    }
}

fn shape_isometry(position: Vec3, shape: TraceShape) -> Isometry<Real> {
    to_isometry(position + shape.center_offset(), Quat::IDENTITY)
}

fn to_isometry(position: Vec3, rotation: Quat) -> Isometry<Real> {
    Isometry::from_parts(
        Translation3::new(position.x, position.y, position.z),
        UnitQuaternion::from_quaternion(Quaternion::new(rotation.w, rotation.x, rotation.y, rotation.z)),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top face at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            LayerMask::GROUND,
        );

        // Wall with its near face at x=9.5
        world.add_box(
            Vec3::new(10.0, 2.5, 0.0),
            Vec3::new(0.5, 2.5, 10.0),
            LayerMask::OBSTACLE,
        );

        world
    }

    #[test]
    fn test_check_sphere_touching_floor() {
        let world = create_test_world();

        assert!(world.check_sphere(Vec3::new(0.0, 0.1, 0.0), 0.2, LayerMask::GROUND));
        assert!(!world.check_sphere(Vec3::new(0.0, 0.5, 0.0), 0.2, LayerMask::GROUND));
    }

    #[test]
    fn test_check_sphere_respects_mask() {
        let world = create_test_world();

        // Touching the wall, but the wall is not ground
        let beside_wall = Vec3::new(9.4, 2.0, 0.0);
        assert!(!world.check_sphere(beside_wall, 0.2, LayerMask::GROUND));
        assert!(world.check_sphere(beside_wall, 0.2, LayerMask::OBSTACLE));
    }

    #[test]
    fn test_check_sphere_rejects_undefined_point() {
        let world = create_test_world();
        assert!(!world.check_sphere(Vec3::NAN, 0.2, LayerMask::ALL));
    }

    #[test]
    fn test_sphere_cast_hits_wall() {
        let world = create_test_world();

        let hit = world
            .sphere_cast(Vec3::new(0.0, 2.0, 0.0), 0.3, Vec3::X, 20.0, LayerMask::ALL)
            .expect("should hit the wall");

        // Sphere surface reaches x=9.5 when its center is at 9.2
        assert!((hit.distance - 9.2).abs() < 0.02, "distance={}", hit.distance);
        assert!(hit.normal.x < -0.9, "normal={:?}", hit.normal);
    }

    #[test]
    fn test_sphere_cast_miss_and_range() {
        let world = create_test_world();

        assert!(world
            .sphere_cast(Vec3::new(0.0, 2.0, 0.0), 0.3, -Vec3::X, 20.0, LayerMask::ALL)
            .is_none());
        assert!(world
            .sphere_cast(Vec3::new(0.0, 2.0, 0.0), 0.3, Vec3::X, 5.0, LayerMask::ALL)
            .is_none());
    }

    #[test]
    fn test_sphere_cast_finds_thin_wall_before_clear_end() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.05, 2.0, 2.0), LayerMask::OBSTACLE);

        // End point (x=10) is clear, the wall in between must still be found
        let hit = world.sphere_cast(Vec3::ZERO, 0.2, Vec3::X, 10.0, LayerMask::ALL);
        let hit = hit.expect("thin wall");
        assert!((hit.distance - 2.75).abs() < 0.02, "distance={}", hit.distance);
    }

    #[test]
    fn test_sphere_cast_nearest_hit_ignores_insertion_order() {
        let far = (Vec3::new(2.8, 0.0, 0.0), Vec3::new(0.5, 2.0, 2.0));
        let near = (Vec3::new(2.77, 0.0, 0.0), Vec3::new(0.5, 2.0, 2.0));

        for near_first in [false, true] {
            let mut world = CollisionWorld::new();
            let ids: Vec<u32> = if near_first { [near, far] } else { [far, near] }
                .into_iter()
                .map(|(center, half)| world.add_box(center, half, LayerMask::OBSTACLE))
                .collect();
            let near_id = if near_first { ids[0] } else { ids[1] };

            let hit = world
                .sphere_cast(Vec3::ZERO, 0.3, Vec3::X, 10.0, LayerMask::ALL)
                .expect("both boxes are in range");

            // Near face at x=2.27, sphere radius 0.3
            assert!((hit.distance - 1.97).abs() < 0.005, "near_first={} distance={}", near_first, hit.distance);
            assert_eq!(hit.collider, near_id);
        }
    }

    #[test]
    fn test_sphere_cast_ignores_starting_overlap() {
        let mut world = CollisionWorld::new();
        world.add_sphere(Vec3::ZERO, 1.0, LayerMask::CHARACTER);
        world.add_box(Vec3::new(0.0, 0.0, -4.0), Vec3::new(2.0, 2.0, 0.5), LayerMask::OBSTACLE);

        let hit = world
            .sphere_cast(Vec3::ZERO, 0.3, -Vec3::Z, 10.0, LayerMask::ALL)
            .expect("box behind the starting volume");
        assert!((hit.distance - 3.2).abs() < 0.02, "distance={}", hit.distance);
    }

    #[test]
    fn test_trace_capsule_stops_before_wall() {
        let world = create_test_world();

        let shape = TraceShape::Capsule { radius: 0.4, height: 1.8 };
        let result = world.trace(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(15.0, 0.0, 0.0),
            shape,
            LayerMask::MOVEMENT_BLOCKING,
        );

        assert!(result.hit_something());
        assert!((result.end_position.x - 9.1).abs() < 0.02, "x={}", result.end_position.x);
        assert_eq!(result.hit_layers, LayerMask::OBSTACLE);
        assert!(!result.started_in_solid, "resting on the floor is not solid");
    }

    #[test]
    fn test_overlaps_and_resolve_penetration() {
        let world = create_test_world();
        let shape = TraceShape::Capsule { radius: 0.4, height: 1.8 };

        assert!(!world.overlaps(Vec3::ZERO, shape, LayerMask::MOVEMENT_BLOCKING));

        let sunk = Vec3::new(0.0, -0.2, 0.0);
        assert!(world.overlaps(sunk, shape, LayerMask::MOVEMENT_BLOCKING));

        let resolved = world.resolve_penetration(sunk, shape, LayerMask::MOVEMENT_BLOCKING);
        assert!(resolved.y >= -CONTACT_SKIN, "y={}", resolved.y);
    }

    #[test]
    fn test_remove_collider() {
        let mut world = create_test_world();
        assert_eq!(world.len(), 2);
        assert!(world.remove(1));
        assert!(!world.remove(1));
        assert_eq!(world.len(), 1);
    }
}
