//! Platformer Game Logic
//!
//! This crate layers a character controller on top of the kinematic mover
//! from `platformer-physics`:
//!
//! - Input snapshots and edge detection
//! - Jump, hang, multi-jump, dash and glide state
//! - Configuration loading
//! - A test level and the fixed-timestep simulation driver
//!
//! # Architecture
//!
//! Each fixed tick the controller turns the input snapshot into a horizontal
//! target and vertical impulses, then hands them to its mover.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Simulation                            │
//! │  ┌──────────┐   ┌─────────────────────┐   ┌────────────────┐  │
//! │  │ Input    │──►│ CharacterController │──►│ KinematicMover │  │
//! │  │ Snapshot │   │ (jump/dash/glide/   │   │ (gravity,      │  │
//! │  └──────────┘   │  horizontal ramp)   │   │  X/Y sweeps)   │  │
//! │                 └─────────────────────┘   └────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod controller;
pub mod dash;
pub mod glide;
pub mod input;
pub mod jump;
pub mod level;
pub mod simulation;

// Re-export main types
pub use config::{ConfigError, ControllerConfig};
pub use controller::CharacterController;
pub use input::{DigitalInput, InputEdges, InputSnapshot};
pub use level::Level;
pub use simulation::{FixedTimestep, Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use platformer_physics::{
    Body, BodyShape, ColliderId, CollisionWorld, KinematicMover, LayerMask, Movable, MoverConfig,
    StepOutcome,
};
