//! Dash cooldown tracking.

use serde::{Deserialize, Serialize};

/// Dash timer a fresh controller starts with, so the first dash is
/// available straight away.
pub const INITIAL_DASH_TIMER: f32 = 4.0;

/// Time since the last dash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    timer: f32,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            timer: INITIAL_DASH_TIMER,
        }
    }
}

impl DashState {
    /// Create a new dash state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count time towards the cooldown. Called once per tick.
    #[inline]
    pub fn advance(&mut self, delta_time: f32) {
        self.timer += delta_time;
    }

    /// Check if the cooldown has strictly elapsed.
    #[inline]
    pub fn ready(&self, cooldown: f32) -> bool {
        self.timer > cooldown
    }

    /// A dash just happened.
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    /// Seconds since the last dash.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Override the timer, e.g. to restore saved state.
    pub fn set_timer(&mut self, timer: f32) {
        self.timer = timer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_ready() {
        let dash = DashState::new();
        assert!(dash.ready(1.0));
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut dash = DashState::new();
        dash.reset();

        dash.set_timer(1.0);
        assert!(!dash.ready(1.0), "Exactly at cooldown should refuse");

        dash.advance(0.01);
        assert!(dash.ready(1.0));
    }
}
