//! Platformer Physics
//!
//! A discrete, kinematic collision-resolution step for 2D platformer
//! characters. Bodies are never simulated as rigid bodies; instead each tick
//! sweeps the body shape through the world one axis at a time and clips the
//! displacement against whatever it would hit.
//!
//! # Architecture
//!
//! The physics crate is split into two systems:
//!
//! - **Collision**: Casts body shapes through the world, returns every hit
//!   along the sweep
//! - **Movement**: Uses those casts to integrate gravity, slide along
//!   surfaces and track ground contact
//!
//! # Design Principles
//!
//! 1. **Stability**: Skin width and a minimum move distance keep the sweep
//!    free of zero-length normalization and sub-pixel jitter
//! 2. **Determinism**: Hits are processed nearest-first with a stable tie-break
//! 3. **Simplicity**: One mover, one shape, one query trait

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{
    BodyShape, CastFilter, CastHit, ColliderId, CollisionWorld, IgnoreSet, LayerMask, ShapeCast,
    ShapeCaster,
};
pub use movement::{Body, KinematicMover, Movable, MoverConfig, StepOutcome};
