//! Entities driven by the simulation.

use glam::Vec3;
use vantage_physics::host::{BodyConfig, ColliderConfig, DynamicBody, KinematicCollider};
use vantage_physics::movement::CharacterState;

use crate::animation::RecordingAnimator;

/// Unique identifier for entities.
pub type EntityId = u32;

/// A kinematic third-person character.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: EntityId,

    pub name: String,

    pub state: CharacterState,

    pub collider: KinematicCollider,

    /// Latest animation parameters.
    pub animator: RecordingAnimator,
}

impl Character {
    pub fn new(
        id: EntityId,
        name: String,
        config: &ColliderConfig,
        position: Vec3,
        facing: f32,
    ) -> Self {
        Self {
            id,
            name,
            state: CharacterState::new(position, facing),
            collider: KinematicCollider::new(config, position),
            animator: RecordingAnimator::new(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.collider.velocity()
    }
}

/// A force-driven rigid-body character.
#[derive(Debug, Clone)]
pub struct Roller {
    pub id: EntityId,

    pub body: DynamicBody,
}

impl Roller {
    pub fn new(id: EntityId, config: &BodyConfig, position: Vec3) -> Self {
        Self {
            id,
            body: DynamicBody::new(config, position),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }
}
