//! Frame-rate independent smoothing and angle helpers.
//!
//! All angles are in degrees. Headings are measured about +Y, with 0 facing
//! +Z and positive values turning toward +X.

use glam::Vec3;

/// Smallest smoothing time accepted by the smooth-damp family.
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Wrap an angle into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Shortest signed difference from `current` to `target`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    wrap_degrees(target - current)
}

/// Critically damped spring toward `target`.
///
/// `velocity` is the persistent accumulator and is updated in place. A
/// non-positive `dt` leaves both the value and the velocity untouched.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if !(dt > 0.0) {
        return current;
    }

    let omega = 2.0 / smooth_time.max(MIN_SMOOTH_TIME);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Never overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// [`smooth_damp`] along the shortest arc between two angles.
pub fn smooth_damp_angle(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Vector [`smooth_damp`].
pub fn smooth_damp_vec3(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    if !(dt > 0.0) {
        return current;
    }

    let omega = 2.0 / smooth_time.max(MIN_SMOOTH_TIME);
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Passed the target this step
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }

    output
}

/// Blend factor of a first-order lag at `rate` per second over `dt`.
///
/// Equals `1 - e^(-rate * dt)`, so splitting a tick in two gives the same
/// result as running it whole.
#[inline]
pub fn exp_blend(rate: f32, dt: f32) -> f32 {
    if !(dt > 0.0) || !(rate > 0.0) {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by fraction `t` along the shortest arc.
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    current + delta_angle(current, target) * t.clamp(0.0, 1.0)
}

/// Heading of a planar direction in degrees.
#[inline]
pub fn heading_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Unit planar direction for a heading in degrees.
#[inline]
pub fn direction_of(heading: f32) -> Vec3 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// Project onto the ground plane and normalize. Zero if nothing is left.
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
