//! Player input handling.
//!
//! The host samples its devices once per tick into an [`InputSnapshot`].
//! [`InputSampler`] turns snapshots into per-model commands and is the only
//! place that remembers the previous tick, which is what press edges need.

use serde::{Deserialize, Serialize};
use vantage_camera::PointerInput;
use vantage_physics::movement::{MoveButtons, MoveCommand};

/// Digital keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub run: bool,
    pub aim: bool,
    pub jump: bool,
    pub crouch: bool,
}

/// Directional keys, for hosts without analog axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Raw `(horizontal, vertical)` axes, each -1, 0 or 1.
    pub fn axes(self) -> (f32, f32) {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        };
        (axis(self.left, self.right), axis(self.backward, self.forward))
    }
}

/// Raw input for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Strafe axis in [-1, 1].
    pub horizontal: f32,

    /// Forward axis in [-1, 1].
    pub vertical: f32,

    /// Pointer delta this tick.
    pub pointer_x: f32,
    pub pointer_y: f32,

    /// Scroll delta this tick, positive zooms in.
    pub scroll: f32,

    pub keys: HeldKeys,
}

impl InputSnapshot {
    /// Snapshot with analog axes taken from directional keys.
    pub fn from_keys(movement: MovementKeys, keys: HeldKeys) -> Self {
        let (horizontal, vertical) = movement.axes();
        Self {
            horizontal,
            vertical,
            keys,
            ..Self::default()
        }
    }
}

/// Commands for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub movement: MoveCommand,
    pub pointer: PointerInput,
}

/// Converts snapshots to commands, detecting press edges.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    previous: HeldKeys,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert this tick's snapshot. Call exactly once per tick.
    pub fn sample(&mut self, snapshot: &InputSnapshot) -> TickInput {
        let keys = snapshot.keys;
        let mut buttons = MoveButtons::default();

        if keys.run {
            buttons.press(MoveButtons::RUN);
        }
        if keys.aim {
            buttons.press(MoveButtons::AIM);
        }
        if keys.jump {
            buttons.press(MoveButtons::JUMP_HELD);
            if !self.previous.jump {
                buttons.press(MoveButtons::JUMP);
            }
        }
        if keys.crouch && !self.previous.crouch {
            buttons.press(MoveButtons::CROUCH);
        }

        self.previous = keys;

        TickInput {
            movement: MoveCommand::new(snapshot.horizontal, snapshot.vertical, buttons),
            pointer: PointerInput::new(snapshot.pointer_x, snapshot.pointer_y, snapshot.scroll),
        }
    }

    /// Forget held keys, e.g. after focus loss.
    pub fn reset(&mut self) {
        self.previous = HeldKeys::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: HeldKeys) -> InputSnapshot {
        InputSnapshot {
            keys,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_jump_edge_fires_once() {
        let mut sampler = InputSampler::new();
        let jump = holding(HeldKeys {
            jump: true,
            ..HeldKeys::default()
        });

        let first = sampler.sample(&jump);
        assert!(first.movement.wants_jump());
        assert!(first.movement.jump_held());

        let second = sampler.sample(&jump);
        assert!(!second.movement.wants_jump());
        assert!(second.movement.jump_held());

        sampler.sample(&InputSnapshot::default());
        assert!(sampler.sample(&jump).movement.wants_jump());
    }

    #[test]
    fn test_crouch_is_press_edge_only() {
        let mut sampler = InputSampler::new();
        let crouch = holding(HeldKeys {
            crouch: true,
            ..HeldKeys::default()
        });

        assert!(sampler.sample(&crouch).movement.wants_crouch_toggle());
        assert!(!sampler.sample(&crouch).movement.wants_crouch_toggle());
    }

    #[test]
    fn test_held_modifiers_pass_through() {
        let mut sampler = InputSampler::new();
        let snapshot = holding(HeldKeys {
            run: true,
            aim: true,
            ..HeldKeys::default()
        });

        for _ in 0..3 {
            let input = sampler.sample(&snapshot);
            assert!(input.movement.running());
            assert!(input.movement.aiming());
        }
    }

    #[test]
    fn test_movement_keys_to_axes() {
        let keys = MovementKeys {
            forward: true,
            left: true,
            ..MovementKeys::default()
        };
        assert_eq!(keys.axes(), (-1.0, 1.0));

        let opposed = MovementKeys {
            forward: true,
            backward: true,
            ..MovementKeys::default()
        };
        assert_eq!(opposed.axes(), (0.0, 0.0));
    }

    #[test]
    fn test_pointer_and_axes_are_sanitized() {
        let mut sampler = InputSampler::new();
        let snapshot = InputSnapshot {
            horizontal: 4.0,
            pointer_x: f32::NAN,
            scroll: 1.0,
            ..InputSnapshot::default()
        };
        let input = sampler.sample(&snapshot);
        assert_eq!(input.movement.horizontal, 1.0);
        assert_eq!(input.pointer.delta_x, 0.0);
        assert_eq!(input.pointer.scroll, 1.0);
    }
}
