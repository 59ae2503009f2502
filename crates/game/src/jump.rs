//! Jump state management.
//!
//! Tracks the jump button edges, how long the current jump has been held,
//! and how much of the jump budget has been spent since the last time the
//! body stood on ground.

use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;

/// What the jump state decided for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpAction {
    /// Nothing to do.
    None,
    /// Leave the ground: set vertical velocity to the jump force.
    Jump,
    /// Keep boosting an ongoing jump while it is held.
    Hang,
    /// Jump again in the air, same impulse as a ground jump.
    ExtraJump,
}

/// Jump state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpState {
    /// Jump button is held.
    pressed: bool,

    /// Button has been released since the last jump started.
    released: bool,

    /// How long the current jump has been held (seconds).
    hold_timer: f32,

    /// Jumps spent since last standing on ground.
    counter: u32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            pressed: false,
            released: true,
            hold_timer: 0.0,
            counter: 0,
        }
    }
}

impl JumpState {
    /// Create a new jump state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump button went down.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Jump button came up. Re-arms the next jump regardless of ground state.
    pub fn release(&mut self) {
        self.pressed = false;
        self.released = true;
    }

    /// Decide what the jump button does this tick.
    ///
    /// # Arguments
    ///
    /// * `grounded` - Whether the body touched ground last step
    /// * `config` - Controller tunables
    /// * `delta_time` - Tick length in seconds
    pub fn update(&mut self, grounded: bool, config: &ControllerConfig, delta_time: f32) -> JumpAction {
        if grounded {
            self.counter = 0;
        }

        if !self.pressed {
            return JumpAction::None;
        }

        if self.released && grounded {
            self.start(1);
            JumpAction::Jump
        } else if !self.released && !grounded {
            self.hold_timer += delta_time;
            if self.hold_timer < config.hang_time {
                JumpAction::Hang
            } else {
                JumpAction::None
            }
        } else if self.released && !grounded && config.multi_jump && self.counter < config.extra_jumps {
            self.start(self.counter + 1);
            JumpAction::ExtraJump
        } else {
            JumpAction::None
        }
    }

    fn start(&mut self, counter: u32) {
        self.counter = counter;
        self.released = false;
        self.hold_timer = 0.0;
    }

    /// Jump button is held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Button has been released since the last jump started.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Jumps spent since last standing on ground.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// How long the current jump has been held.
    pub fn hold_timer(&self) -> f32 {
        self.hold_timer
    }

    /// Forget the held button, e.g. when input is detached.
    pub fn clear_input(&mut self) {
        self.pressed = false;
        self.released = true;
    }
}

// ============================================================================
// Tests
// ============================================================================
