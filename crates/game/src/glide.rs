//! Gravity-suspension window after an airborne dash.

use serde::{Deserialize, Serialize};

/// Single-slot glide timer.
///
/// At most one glide is ever pending. Starting a glide while one is running
/// replaces it, so the window always ends `duration` after the latest dash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlideTimer {
    remaining: Option<f32>,
}

impl GlideTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the window.
    ///
    /// Returns `true` if a running glide was replaced.
    pub fn start(&mut self, duration: f32) -> bool {
        self.remaining.replace(duration).is_some()
    }

    /// Count down by one tick.
    ///
    /// Returns `true` exactly once, on the tick the window runs out.
    pub fn advance(&mut self, delta_time: f32) -> bool {
        match self.remaining {
            Some(remaining) if remaining - delta_time <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - delta_time);
                false
            }
            None => false,
        }
    }

    /// Drop the pending window without firing it.
    ///
    /// Returns `true` if a glide was running.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    /// Check if a glide is running.
    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left in the running glide.
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_once() {
        let mut glide = GlideTimer::new();
        assert!(!glide.start(0.5));

        assert!(!glide.advance(0.25));
        assert!(glide.advance(0.25));
        assert!(!glide.is_active());
        assert!(!glide.advance(0.25));
    }

    #[test]
    fn test_restart_replaces_window() {
        let mut glide = GlideTimer::new();
        glide.start(0.5);
        glide.advance(0.25);

        assert!(glide.start(0.5), "Should report replacing the running glide");
        assert_eq!(glide.remaining(), Some(0.5));

        assert!(!glide.advance(0.25));
        assert!(glide.advance(0.25));
    }

    #[test]
    fn test_cancel() {
        let mut glide = GlideTimer::new();
        assert!(!glide.cancel());

        glide.start(1.0);
        assert!(glide.cancel());
        assert!(!glide.advance(2.0));
    }
}
