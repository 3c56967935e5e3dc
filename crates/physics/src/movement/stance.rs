//! Crouch toggle.
//!
//! A press of the crouch key flips between standing and crouching. The
//! collider is resized and its center kept at half the height, so its base
//! stays on the ground whatever the height.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::host::{CharacterCollider, CollisionQuery};

use super::config::LocomotionConfig;
use super::state::{CharacterState, MotionFlags};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    pub fn of(state: &CharacterState) -> Self {
        if state.flags.crouched() {
            Stance::Crouching
        } else {
            Stance::Standing
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Stance::Standing => Stance::Crouching,
            Stance::Crouching => Stance::Standing,
        }
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StanceChange {
    /// Stance changed to the contained one.
    Changed(Stance),
    /// Standing up was refused for lack of headroom.
    Blocked,
}

pub struct StanceController;

impl StanceController {
    /// Flip the stance and resize the collider.
    pub fn toggle(
        config: &LocomotionConfig,
        state: &mut CharacterState,
        collider: &mut impl CharacterCollider,
        query: &impl CollisionQuery,
    ) -> StanceChange {
        let next = Stance::of(state).toggled();
        let crouched = next == Stance::Crouching;
        let height = config.height(crouched);

        if !crouched && config.check_headroom {
            let feet = collider.position();
            if query.overlaps_capsule(feet, collider.radius(), height, config.headroom_mask) {
                log::debug!("stand up refused: no headroom at {:?}", feet);
                return StanceChange::Blocked;
            }
        }

        Self::apply(state, collider, crouched, height);
        log::debug!("stance -> {:?} (height {:.2})", next, height);
        StanceChange::Changed(next)
    }

    /// Force a stance without any checks, e.g. on spawn.
    pub fn set(config: &LocomotionConfig, state: &mut CharacterState, collider: &mut impl CharacterCollider, stance: Stance) {
        let crouched = stance == Stance::Crouching;
        Self::apply(state, collider, crouched, config.height(crouched));
    }

    fn apply(state: &mut CharacterState, collider: &mut impl CharacterCollider, crouched: bool, height: f32) {
        state.flags.set(MotionFlags::CROUCHED, crouched);
        collider.set_height(height);
        collider.set_center(Vec3::new(0.0, collider.height() / 2.0, 0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionWorld, LayerMask};
    use crate::host::tests_support::RecordingCollider;

    fn open_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(20.0, 0.5, 20.0),
            LayerMask::GROUND,
        );
        world
    }

    #[test]
    fn test_toggle_keeps_center_at_half_height() {
        let config = LocomotionConfig::default();
        let world = open_world();
        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();

        for expected in [Stance::Crouching, Stance::Standing, Stance::Crouching] {
            let change = StanceController::toggle(&config, &mut state, &mut collider, &world);
            assert_eq!(change, StanceChange::Changed(expected));
            assert_eq!(collider.center().y, collider.height() / 2.0);
        }
        assert_eq!(collider.height(), 1.0);
        assert!(state.flags.crouched());
    }

    #[test]
    fn test_stand_up_blocked_under_low_ceiling() {
        let config = LocomotionConfig::default();
        let mut world = open_world();
        // Ceiling underside at 1.5
        world.add_box(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(3.0, 0.5, 3.0),
            LayerMask::OBSTACLE,
        );

        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();
        StanceController::set(&config, &mut state, &mut collider, Stance::Crouching);

        let change = StanceController::toggle(&config, &mut state, &mut collider, &world);
        assert_eq!(change, StanceChange::Blocked);
        assert!(state.flags.crouched());
        assert_eq!(collider.height(), 1.0);
        assert_eq!(collider.center().y, 0.5);
    }

    #[test]
    fn test_headroom_check_can_be_disabled() {
        let config = LocomotionConfig {
            check_headroom: false,
            ..LocomotionConfig::default()
        };
        let mut world = open_world();
        world.add_box(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(3.0, 0.5, 3.0),
            LayerMask::OBSTACLE,
        );

        let mut state = CharacterState::default();
        let mut collider = RecordingCollider::default();
        StanceController::set(&config, &mut state, &mut collider, Stance::Crouching);

        let change = StanceController::toggle(&config, &mut state, &mut collider, &world);
        assert_eq!(change, StanceChange::Changed(Stance::Standing));
        assert_eq!(collider.center().y, 1.0);
    }
}
