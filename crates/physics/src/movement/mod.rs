//! Kinematic body movement.
//!
//! This module implements the platformer sweep-and-slide step:
//!
//! - Gravity integration with a terminal fall speed
//! - Horizontal motion that follows the ground slope
//! - Axis-separated sweeps (X then Y) with skin-width clipping
//! - Ground classification from contact normals
//! - Velocity deflection along whatever was hit
//!
//! # Design
//!
//! Movement is owned by the [`KinematicMover`], which holds the [`Body`]
//! state and advances it through any [`crate::ShapeCaster`]. Higher layers
//! drive it through the [`Movable`] capability rather than reaching into
//! the body directly.

mod body;
mod config;
mod mover;
mod slide;

pub use body::Body;
pub use config::MoverConfig;
pub use mover::{KinematicMover, Movable, StepOutcome};
pub use slide::{clip_velocity, surface_tangent};
