//! Planar locomotion: input and camera facing to smoothed motion.
//!
//! Speed follows a first-order lag toward the speed the input asks for.
//! Facing either turns smoothly toward the movement direction or, while
//! aiming, blends toward the camera's facing. The resulting displacement is
//! handed to the collider, which decides how much of it actually happens.

use glam::Vec3;

use crate::host::CharacterCollider;
use crate::smoothing::{exp_blend, heading_of, lerp_angle, smooth_damp_angle, wrap_degrees};

use super::config::LocomotionConfig;
use super::state::{CameraBasis, CharacterState, MotionFlags, MoveCommand};

/// What one locomotion step did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionReport {
    /// Speed the input asked for this tick.
    pub desired_speed: f32,
    /// Displacement submitted to the collider.
    pub requested: Vec3,
    /// Displacement the collider applied.
    pub actual: Vec3,
}

/// The planar locomotion model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locomotion;

impl Locomotion {
    /// Run one locomotion step.
    ///
    /// `camera` is the planar basis input is expressed in; without one the
    /// world axes are used and aiming holds the current facing.
    pub fn update(
        config: &LocomotionConfig,
        state: &mut CharacterState,
        command: &MoveCommand,
        camera: Option<&CameraBasis>,
        collider: &mut impl CharacterCollider,
        dt: f32,
    ) -> LocomotionReport {
        let running = command.running();
        let aiming = command.aiming();
        state.flags.set(MotionFlags::RUNNING, running);
        state.flags.set(MotionFlags::AIMING, aiming);

        // Speed
        let target_speed = config.target_speed(running, state.flags.crouched(), aiming);
        let desired_speed = target_speed * command.magnitude();
        state.speed += (desired_speed - state.speed) * exp_blend(config.acceleration, dt);

        let mut report = LocomotionReport {
            desired_speed,
            ..LocomotionReport::default()
        };

        let input = Vec3::new(command.horizontal, 0.0, command.vertical);
        if input.length() < config.input_dead_zone.max(f32::EPSILON) {
            return report;
        }

        let basis = camera.copied().unwrap_or(CameraBasis::WORLD);
        let direction = (basis.forward * command.vertical + basis.right * command.horizontal).normalize_or_zero();
        if direction == Vec3::ZERO {
            return report;
        }

        // Facing
        if aiming {
            if let Some(camera) = camera {
                let t = exp_blend(config.aim_turn_rate, dt);
                state.yaw = lerp_angle(state.yaw, heading_of(camera.forward), t);
            }
        } else {
            state.yaw = smooth_damp_angle(
                state.yaw,
                heading_of(direction),
                &mut state.turn_velocity,
                config.rotate_smooth_time,
                dt,
            );
        }
        state.yaw = wrap_degrees(state.yaw);
        state.heading = heading_of(direction);

        // Displacement
        report.requested = direction * state.speed * dt;
        report.actual = collider.move_by(report.requested);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::tests_support::RecordingCollider;

    const DT: f32 = 1.0 / 60.0;

    fn forward() -> MoveCommand {
        MoveCommand::new(0.0, 1.0, Default::default())
    }

    #[test]
    fn test_speed_converges_to_walk_speed() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();

        let mut last = LocomotionReport::default();
        for _ in 0..180 {
            last = Locomotion::update(&config, &mut state, &forward(), None, &mut collider, DT);
        }

        assert_eq!(last.desired_speed, 2.0);
        assert!((state.speed - 2.0).abs() < 1e-3, "speed={}", state.speed);
        assert!((last.requested.length() - 2.0 * DT).abs() < 1e-4);
        assert!(last.requested.z > 0.0);
    }

    #[test]
    fn test_first_tick_follows_exponential_lag() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();

        Locomotion::update(&config, &mut state, &forward(), None, &mut collider, 0.1);

        let expected = 2.0 * (1.0 - (-1.0f32).exp());
        assert!((state.speed - expected).abs() < 1e-5);
    }

    #[test]
    fn test_zero_input_skips_turn_and_move() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, 45.0);
        state.speed = 1.0;
        let mut collider = RecordingCollider::default();

        let report = Locomotion::update(&config, &mut state, &MoveCommand::default(), None, &mut collider, DT);

        assert_eq!(report.requested, Vec3::ZERO);
        assert!(collider.moves.is_empty());
        assert_eq!(state.yaw, 45.0);
        // Speed still decays toward zero
        assert!(state.speed < 1.0);
    }

    #[test]
    fn test_turns_toward_camera_relative_direction() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();
        let camera = CameraBasis::from_yaw(90.0);

        for _ in 0..120 {
            Locomotion::update(&config, &mut state, &forward(), Some(&camera), &mut collider, DT);
        }

        assert!((state.yaw - 90.0).abs() < 0.5, "yaw={}", state.yaw);
        assert!((state.heading - 90.0).abs() < 1e-3);
        let last = collider.moves.last().copied().unwrap_or_default();
        assert!(last.x > 0.0 && last.z.abs() < 1e-5);
    }

    #[test]
    fn test_turn_takes_shortest_arc() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::new(Vec3::ZERO, 170.0);
        let mut collider = RecordingCollider::default();
        let camera = CameraBasis::from_yaw(-170.0);

        Locomotion::update(&config, &mut state, &forward(), Some(&camera), &mut collider, DT);

        // Turned up through 180 rather than back down through 0
        assert!(state.yaw > 170.0 || state.yaw < -170.0, "yaw={}", state.yaw);
    }

    #[test]
    fn test_aiming_faces_camera_and_slows() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();
        let camera = CameraBasis::from_yaw(30.0);

        let mut buttons = crate::movement::MoveButtons::default();
        buttons.press(crate::movement::MoveButtons::AIM);
        // Strafing right while aiming
        let strafe = MoveCommand::new(1.0, 0.0, buttons);

        let mut report = LocomotionReport::default();
        for _ in 0..120 {
            report = Locomotion::update(&config, &mut state, &strafe, Some(&camera), &mut collider, DT);
        }

        assert!((state.yaw - 30.0).abs() < 0.01, "yaw={}", state.yaw);
        assert_eq!(report.desired_speed, 1.0);
        assert!(state.flags.aiming());
    }

    #[test]
    fn test_aim_turn_is_independent_of_tick_split() {
        let config = LocomotionConfig::default();
        let camera = CameraBasis::from_yaw(30.0);
        let mut buttons = crate::movement::MoveButtons::default();
        buttons.press(crate::movement::MoveButtons::AIM);
        let command = MoveCommand::new(0.0, 1.0, buttons);

        let mut whole = CharacterState::default();
        Locomotion::update(&config, &mut whole, &command, Some(&camera), &mut RecordingCollider::default(), 2.0 * DT);

        let mut split = CharacterState::default();
        for _ in 0..2 {
            Locomotion::update(&config, &mut split, &command, Some(&camera), &mut RecordingCollider::default(), DT);
        }

        let expected = 30.0 * (1.0 - (-config.aim_turn_rate * 2.0 * DT).exp());
        assert!((whole.yaw - expected).abs() < 1e-3, "yaw={}", whole.yaw);
        assert!((split.yaw - whole.yaw).abs() < 1e-3, "split={} whole={}", split.yaw, whole.yaw);
    }

    #[test]
    fn test_diagonal_input_does_not_overdrive() {
        let config = LocomotionConfig::default();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();

        let report = Locomotion::update(
            &config,
            &mut state,
            &MoveCommand::new(1.0, 1.0, Default::default()),
            None,
            &mut collider,
            DT,
        );
        assert_eq!(report.desired_speed, 2.0);
    }
}
