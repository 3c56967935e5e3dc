//! Collision layers for query filtering.
//!
//! Every collider in the world belongs to one or more layers. Queries carry
//! a mask and only see colliders whose layers intersect it, which is how the
//! ground sensor ignores walls and the camera probe ignores characters.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// A set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers at all. Queries with this mask never hit.
    pub const NONE: Self = Self(0);

    /// Untagged static geometry.
    pub const DEFAULT: Self = Self(1 << 0);

    /// Walkable surfaces (floors, ramps, stair treads).
    pub const GROUND: Self = Self(1 << 1);

    /// Walls, pillars and props that block movement but are not walkable.
    pub const OBSTACLE: Self = Self(1 << 2);

    /// Character bodies.
    pub const CHARACTER: Self = Self(1 << 3);

    /// Non-blocking volumes.
    pub const TRIGGER: Self = Self(1 << 4);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Geometry a character collider sweeps against.
    pub const MOVEMENT_BLOCKING: Self = Self(Self::DEFAULT.0 | Self::GROUND.0 | Self::OBSTACLE.0);

    /// Geometry that occludes the orbit camera. Characters are left out so
    /// the camera never pulls in because of its own target.
    pub const CAMERA_BLOCKING: Self = Self(Self::DEFAULT.0 | Self::GROUND.0 | Self::OBSTACLE.0);

    /// Check if every layer in `other` is present.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any layer is shared.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
