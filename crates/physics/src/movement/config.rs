//! Mover configuration constants.
//!
//! All sweep tunables are grouped here for easy tuning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::LayerMask;

/// Configuration for the kinematic mover.
///
/// Units are world units and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    // ========================================================================
    // Gravity
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: Vec2,

    /// Multiplier applied to `gravity`.
    pub gravity_modifier: f32,

    /// Terminal fall speed (units/second). Negative; vertical velocity is
    /// never allowed below it.
    pub max_fall_speed: f32,

    /// Vertical velocity while gravity is disabled (units/second).
    /// A small downward bias keeps ground contact alive during a glide.
    pub gravity_disabled_fall_speed: f32,

    // ========================================================================
    // Sweep
    // ========================================================================
    /// Margin kept between the body and anything it hits.
    /// Needs to be at least 10% of the body's top speed per tick.
    pub skin_width: f32,

    /// Movement shorter than this is skipped.
    pub min_move_distance: f32,

    /// Minimum normal Y for a contact to count as ground.
    /// 0.65 ≈ 49 degree max slope.
    pub min_ground_normal_y: f32,

    /// Layers the body collides with.
    pub collision_mask: LayerMask,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            gravity_modifier: 5.0,
            max_fall_speed: -40.0,
            gravity_disabled_fall_speed: -0.8,

            skin_width: 0.2,
            min_move_distance: 0.001,
            min_ground_normal_y: 0.65,
            collision_mask: LayerMask::MASK_CHARACTER,
        }
    }
}

impl MoverConfig {
    /// Velocity change from gravity over one step.
    #[inline]
    pub fn gravity_delta(&self, delta_time: f32) -> Vec2 {
        self.gravity * self.gravity_modifier * delta_time
    }

    /// Check if a contact normal counts as ground.
    #[inline]
    pub fn is_ground(&self, normal: Vec2) -> bool {
        normal.y > self.min_ground_normal_y
    }
}
