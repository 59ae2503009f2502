//! Kinematic body state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{BodyShape, IgnoreSet};

/// Complete state of a kinematic body.
///
/// Position and velocity are only written by the mover; everything else
/// reads them once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre of the body shape in world space.
    pub position: Vec2,

    /// Velocity in world space (units/second).
    pub velocity: Vec2,

    /// Normal of the last floor contact. Only meaningful while grounded.
    pub ground_normal: Vec2,

    /// Whether the last step touched ground. Recomputed every step.
    pub grounded: bool,

    /// Whether gravity is integrated.
    pub gravity_enabled: bool,

    /// Collision shape swept through the world.
    pub shape: BodyShape,

    /// Colliders this body passes through.
    pub ignored: IgnoreSet,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ground_normal: Vec2::Y,
            grounded: false,
            gravity_enabled: true,
            shape: BodyShape::default(),
            ignored: IgnoreSet::new(),
        }
    }
}

impl Body {
    /// Create a body at the given position.
    pub fn new(position: Vec2, shape: BodyShape) -> Self {
        Self {
            position,
            shape,
            ..Default::default()
        }
    }
}
