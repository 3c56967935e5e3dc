//! Sweep-and-slide resolution for kinematic shapes.
//!
//! A requested displacement is traced through the world; whenever the shape
//! is stopped, the remainder is clipped against the surfaces touched so far
//! and traced again. Stair stepping retries a blocked move from a raised
//! position and keeps whichever attempt covered more horizontal ground.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::layers::LayerMask;
use super::trace::TraceShape;
use super::world::CollisionWorld;

/// Maximum number of collision planes to track during one slide.
const MAX_CLIP_PLANES: usize = 5;

/// Tuning for [`slide_move`] and [`step_slide_move`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideSettings {
    /// Maximum trace/clip iterations per slide.
    pub max_iterations: usize,
    /// Clip factor slightly above one, keeps the shape off the surface.
    pub overbounce: f32,
    /// Maximum ledge height climbed by [`step_slide_move`].
    pub step_offset: f32,
    /// Minimum normal Y for a surface to count as walkable.
    pub min_ground_normal: f32,
    /// Geometry the shape collides with.
    pub mask: LayerMask,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            max_iterations: 4,
            overbounce: 1.001,
            step_offset: 0.3,
            min_ground_normal: 45.0_f32.to_radians().cos(),
            mask: LayerMask::MOVEMENT_BLOCKING,
        }
    }
}

/// Outcome of a slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// Where the shape ended up.
    pub position: Vec3,
    /// Whether any surface interfered with the move.
    pub blocked: bool,
    /// Last surface normal touched, if any.
    pub last_normal: Option<Vec3>,
}

/// Remove the part of `motion` that goes into a surface.
///
/// The into-surface component is scaled by `overbounce` so the result points
/// slightly away from the plane.
pub fn clip_displacement(motion: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = motion.dot(normal);

    let adjusted_backoff = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };

    motion - normal * adjusted_backoff
}

/// Move a shape by `displacement`, sliding along whatever it touches.
pub fn slide_move(
    world: &CollisionWorld,
    start: Vec3,
    displacement: Vec3,
    shape: TraceShape,
    settings: &SlideSettings,
) -> SlideResult {
    let mut position = start;
    let mut remaining = displacement;
    let mut planes = [Vec3::ZERO; MAX_CLIP_PLANES];
    let mut num_planes = 0;
    let mut last_normal = None;

    for _ in 0..settings.max_iterations.max(1) {
        if remaining.length_squared() < 1.0e-10 {
            break;
        }

        let trace = world.trace(position, position + remaining, shape, settings.mask);

        if trace.fraction > 0.0 {
            position = trace.end_position;
        }

        if !trace.hit_something() {
            return SlideResult {
                position,
                blocked: num_planes > 0,
                last_normal,
            };
        }

        if trace.all_solid {
            // Stuck; nudge out instead of freezing in place
            let freed = world.resolve_penetration(position, shape, settings.mask);
            return SlideResult {
                position: freed,
                blocked: true,
                last_normal: trace.hit_normal,
            };
        }

        remaining *= 1.0 - trace.fraction;
        let normal = trace.normal_or_up();
        last_normal = Some(normal);

        if num_planes < MAX_CLIP_PLANES {
            planes[num_planes] = normal;
            num_planes += 1;
        }

        // Find a clip that leaves every touched plane
        let mut clipped = None;
        for i in 0..num_planes {
            let candidate = clip_displacement(remaining, planes[i], settings.overbounce);
            let valid = (0..num_planes)
                .filter(|&j| j != i)
                .all(|j| candidate.dot(planes[j]) >= -1.0e-4);
            if valid {
                clipped = Some(candidate);
                break;
            }
        }

        remaining = match clipped {
            Some(motion) => motion,
            None if num_planes >= 2 => {
                // Crease between the first two planes
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                crease * remaining.dot(crease)
            }
            None => Vec3::ZERO,
        };
    }

    SlideResult {
        position,
        blocked: num_planes > 0,
        last_normal,
    }
}

/// Slide with stair stepping.
///
/// Stepping is only attempted for moves with a horizontal component; purely
/// vertical moves (gravity, jumps) are plain slides.
pub fn step_slide_move(
    world: &CollisionWorld,
    start: Vec3,
    displacement: Vec3,
    shape: TraceShape,
    settings: &SlideSettings,
) -> SlideResult {
    let flat = slide_move(world, start, displacement, shape, settings);

    let horizontal = Vec3::new(displacement.x, 0.0, displacement.z);
    if !flat.blocked || settings.step_offset <= 0.0 || horizontal.length_squared() < 1.0e-10 {
        return flat;
    }

    let flat_progress = planar_distance_sq(flat.position, start);

    // Step up
    let up = world.trace(
        start,
        start + Vec3::new(0.0, settings.step_offset, 0.0),
        shape,
        settings.mask,
    );
    if up.all_solid {
        return flat;
    }

    // Move across from the raised position
    let across = slide_move(world, up.end_position, horizontal, shape, settings);

    // Step back down onto whatever is below
    let lift = up.end_position.y - start.y;
    let down = world.trace(
        across.position,
        across.position - Vec3::new(0.0, lift + 0.01, 0.0),
        shape,
        settings.mask,
    );
    if down.all_solid {
        return flat;
    }

    let landed_on_ground = down
        .hit_normal
        .map_or(false, |n| n.y >= settings.min_ground_normal);
    if down.hit_something() && !landed_on_ground {
        return flat;
    }

    let stepped = down.end_position;
    if planar_distance_sq(stepped, start) > flat_progress + 1.0e-8 {
        SlideResult {
            position: stepped,
            blocked: across.blocked,
            last_normal: down.hit_normal.or(across.last_normal),
        }
    } else {
        flat
    }
}

fn planar_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    d.x * d.x + d.z * d.z
}
