//! Collision queries for kinematic movement.
//!
//! This module provides the world geometry and the shape-cast query the
//! mover sweeps through.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The collision environment containing all colliders
//! - [`ShapeCaster`]: The query capability the mover depends on
//! - [`CastHit`]: One obstacle found along a sweep
//! - [`BodyShape`]: Shape used for casting (box, capsule or circle)
//!
//! # Casting
//!
//! A cast sweeps a shape from an origin along a unit direction and reports
//! every collider it would touch within the maximum distance:
//! - Distance travelled before contact
//! - Surface normal of the obstacle at impact
//! - Identity of the collider that was hit

mod cast;
mod ignore;
mod layers;
mod world;

pub use cast::{BodyShape, CastFilter, CastHit, ColliderId, ShapeCast, ShapeCaster};
pub use ignore::IgnoreSet;
pub use layers::LayerMask;
pub use world::{Collider, CollisionWorld};
