//! Player input handling.
//!
//! The host samples its input devices once per tick into an
//! [`InputSnapshot`]. The controller diffs consecutive snapshots itself to
//! find button edges, so nothing needs to be registered or unregistered.

use serde::{Deserialize, Serialize};

/// Input state for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Horizontal axis (-1.0 to 1.0). Positive = right.
    pub move_axis: f32,

    /// Jump button held.
    pub jump: bool,

    /// Dash button held.
    pub dash: bool,
}

impl InputSnapshot {
    /// Copy with the axis clamped to [-1, 1] and NaN treated as centred.
    pub fn sanitized(self) -> Self {
        let move_axis = if self.move_axis.is_nan() {
            0.0
        } else {
            self.move_axis.clamp(-1.0, 1.0)
        };
        Self { move_axis, ..self }
    }

    /// Check if any horizontal input is active.
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.move_axis != 0.0
    }
}

/// Button transitions between two consecutive snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    /// Jump went down this tick.
    pub jump_pressed: bool,

    /// Jump came up this tick.
    pub jump_released: bool,

    /// Dash went down this tick.
    pub dash_pressed: bool,
}

impl InputEdges {
    /// Compare the previous tick's snapshot with the current one.
    pub fn between(previous: &InputSnapshot, current: &InputSnapshot) -> Self {
        Self {
            jump_pressed: current.jump && !previous.jump,
            jump_released: !current.jump && previous.jump,
            dash_pressed: current.dash && !previous.dash,
        }
    }
}

/// Raw digital key states, as a keyboard would report them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DigitalInput {
    /// Move left key held.
    pub left: bool,

    /// Move right key held.
    pub right: bool,

    /// Jump key held.
    pub jump: bool,

    /// Dash key held.
    pub dash: bool,
}

impl DigitalInput {
    /// Convert to a controller snapshot.
    ///
    /// Opposing directions cancel out.
    pub fn to_snapshot(&self) -> InputSnapshot {
        let mut move_axis = 0.0;
        if self.right {
            move_axis += 1.0;
        }
        if self.left {
            move_axis -= 1.0;
        }

        InputSnapshot {
            move_axis,
            jump: self.jump,
            dash: self.dash,
        }
    }
}
