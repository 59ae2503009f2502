//! Controller configuration and config-file errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use platformer_physics::LayerMask;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the character controller.
///
/// Speeds are in units/second, rates in units/second², times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Horizontal movement
    // ========================================================================
    /// Top horizontal speed at full input.
    pub speed: f32,

    /// Ramp rate towards target speed on the ground with input held.
    pub acceleration: f32,

    /// Ramp rate towards zero on the ground with no input.
    pub deceleration: f32,

    /// Ramp rate towards target speed in the air with input held.
    pub air_acceleration: f32,

    /// Ramp rate towards zero in the air with no input.
    pub air_deceleration: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Vertical velocity set by a jump.
    pub jump_force: f32,

    /// How long a held jump keeps adding upward impulse.
    pub hang_time: f32,

    /// Allow jumping again in the air.
    pub multi_jump: bool,

    /// Jump budget including the ground jump. Valid range 2..=4.
    pub extra_jumps: u32,

    // ========================================================================
    // Dashing
    // ========================================================================
    /// Allow dashing at all.
    pub can_dash: bool,

    /// Horizontal speed a dash snaps to.
    pub dash_speed: f32,

    /// Time after a dash before the next is allowed.
    pub dash_cooldown: f32,

    /// How long an airborne dash suspends gravity.
    pub glide_time: f32,

    /// Layers the horizontal obstruction probe checks.
    pub obstruction_mask: LayerMask,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            acceleration: 20.0,
            deceleration: 20.0,
            air_acceleration: 10.0,
            air_deceleration: 10.0,

            jump_force: 10.0,
            hang_time: 0.1,
            multi_jump: false,
            extra_jumps: 2,

            can_dash: true,
            dash_speed: 20.0,
            dash_cooldown: 1.0,
            glide_time: 0.25,

            obstruction_mask: LayerMask::OBSTRUCTION,
        }
    }
}

impl ControllerConfig {
    /// Smallest accepted jump budget.
    pub const MIN_EXTRA_JUMPS: u32 = 2;

    /// Largest accepted jump budget.
    pub const MAX_EXTRA_JUMPS: u32 = 4;

    /// Horizontal ramp rate for the current situation.
    pub fn ramp_rate(&self, grounded: bool, has_input: bool) -> f32 {
        match (grounded, has_input) {
            (true, true) => self.acceleration,
            (true, false) => self.deceleration,
            (false, true) => self.air_acceleration,
            (false, false) => self.air_deceleration,
        }
    }

    /// Check values a config file could get wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_EXTRA_JUMPS..=Self::MAX_EXTRA_JUMPS).contains(&self.extra_jumps) {
            return Err(ConfigError::Invalid(format!(
                "extra_jumps must be in {}..={}, got {}",
                Self::MIN_EXTRA_JUMPS,
                Self::MAX_EXTRA_JUMPS,
                self.extra_jumps
            )));
        }
        if self.dash_cooldown < 0.0 || self.glide_time < 0.0 || self.hang_time < 0.0 {
            return Err(ConfigError::Invalid(
                "dash_cooldown, glide_time and hang_time must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
