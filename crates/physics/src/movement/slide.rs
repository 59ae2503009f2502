//! Velocity response helpers for the sweep.

use glam::Vec2;

/// Clip velocity against a surface normal.
///
/// Removes the component of velocity going into the surface so the body
/// slides along it. Velocity already leaving the surface is unchanged.
pub fn clip_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let projection = velocity.dot(normal);
    if projection < 0.0 {
        velocity - normal * projection
    } else {
        velocity
    }
}

/// Direction along a surface, rotated clockwise from its normal.
///
/// For flat ground (`Vec2::Y`) this is `Vec2::X`; on a slope it points
/// along the incline so horizontal motion follows the ground.
#[inline]
pub fn surface_tangent(normal: Vec2) -> Vec2 {
    Vec2::new(normal.y, -normal.x)
}
