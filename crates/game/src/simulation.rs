//! Game simulation - the fixed-tick game loop.
//!
//! This module owns the level and the player's controller and advances them
//! one fixed step at a time. Everything it does is a pure function of the
//! config, the level and the input sequence.

use std::path::Path;

use glam::Vec2;
use platformer_physics::{Body, BodyShape, KinematicMover, MoverConfig, StepOutcome};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ControllerConfig};
use crate::controller::CharacterController;
use crate::input::InputSnapshot;
use crate::level::Level;

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Spawn point name. `None` uses the level's first spawn point.
    pub spawn: Option<String>,

    /// How far below the spawn point to look for ground.
    pub spawn_drop: f32,

    /// Kinematic mover configuration.
    pub mover: MoverConfig,

    /// Character controller configuration.
    pub controller: ControllerConfig,

    /// Player collision shape.
    pub body_shape: BodyShape,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 50,
            spawn: None,
            spawn_drop: 4.0,
            mover: MoverConfig::default(),
            controller: ControllerConfig::default(),
            body_shape: BodyShape::UNIT_BOX,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Parse a config from TOML. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Write this config as pretty TOML.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check values a config file could get wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".to_string()));
        }
        if self.mover.skin_width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "skin_width must be positive, got {}",
                self.mover.skin_width
            )));
        }
        if self.mover.min_move_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "min_move_distance must not be negative".to_string(),
            ));
        }
        if self.mover.max_fall_speed >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_fall_speed must be negative, got {}",
                self.mover.max_fall_speed
            )));
        }
        self.controller.validate()
    }
}

/// The main game simulation.
///
/// Holds one level and one player controller and advances them
/// deterministically from the input sequence.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    controller: CharacterController,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    ///
    /// The player is dropped onto the ground below the configured spawn
    /// point.
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        let spawn = Self::spawn_position(&config, &level);

        let mut mover = KinematicMover::new(config.mover.clone(), Body::new(spawn, config.body_shape));
        mover.spawn_at(&level.collision, spawn, config.spawn_drop);

        let controller = CharacterController::new(config.controller.clone(), mover);

        log::info!(
            "simulation started on '{}' at {:?}, {} Hz",
            level.name,
            controller.position(),
            config.tick_rate
        );

        Self {
            frame: 0,
            config,
            level,
            controller,
        }
    }

    /// Create a simulation with default configuration and test course.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default(), Level::test_course())
    }

    /// Advance the simulation by one tick.
    ///
    /// Returns the mover outcome, or `None` while the controller is
    /// deactivated. The frame counter advances either way.
    pub fn tick(&mut self, input: &InputSnapshot) -> Option<StepOutcome> {
        let delta_time = self.config.delta_time();

        self.update_one_way_platforms();

        let outcome = self.controller.tick(&self.level.collision, input, delta_time);

        if let Some(outcome) = &outcome {
            for trigger_id in self.level.check_triggers(outcome.position) {
                log::info!("frame {}: triggered '{}'", self.frame, trigger_id);
            }
        }

        self.frame += 1;
        outcome
    }

    /// Put the player back at the spawn point, at rest.
    pub fn respawn(&mut self) {
        let spawn = Self::spawn_position(&self.config, &self.level);
        let drop = self.config.spawn_drop;
        self.controller.reset();
        self.controller.mover_mut().spawn_at(&self.level.collision, spawn, drop);
        log::debug!("respawned at {:?}", self.controller.position());
    }

    /// The player's controller.
    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    /// Mutable access to the player's controller.
    pub fn controller_mut(&mut self) -> &mut CharacterController {
        &mut self.controller
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }

    /// Ignore every one-way platform the player is below, collide with the
    /// rest.
    fn update_one_way_platforms(&mut self) {
        let body = self.controller.body();
        let bottom = body.position.y - body.shape.half_extents().y;

        for platform in &self.level.one_way_platforms {
            if platform.passes_through(bottom) {
                if self.controller.add_to_ignore_list(platform.collider) {
                    log::trace!("passing through {:?}", platform.collider);
                }
            } else if self.controller.remove_from_ignore_list(platform.collider) {
                log::trace!("standing on {:?}", platform.collider);
            }
        }
    }

    fn spawn_position(config: &SimulationConfig, level: &Level) -> Vec2 {
        match &config.spawn {
            Some(name) => match level.spawn(name) {
                Some(spawn) => spawn.position,
                None => {
                    log::warn!("no spawn point named '{}', using default", name);
                    level.default_spawn()
                }
            },
            None => level.default_spawn(),
        }
    }
}

/// Converts variable frame times into whole fixed ticks.
///
/// Leftover time carries into the next frame, so no time is ever lost and
/// no tick is ever dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create an accumulator for the given tick rate.
    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / f64::from(tick_rate.max(1)),
            accumulator: 0.0,
        }
    }

    /// Add a frame's worth of time.
    ///
    /// Returns how many fixed ticks to run now.
    /// Negative and non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_time: f64) -> u32 {
        if frame_time.is_finite() && frame_time > 0.0 {
            self.accumulator += frame_time;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick carried over, for render interpolation.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }

    /// Tick length in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DigitalInput;
    use crate::level::SpawnPoint;
    use platformer_physics::LayerMask;

    fn run_right() -> InputSnapshot {
        DigitalInput {
            right: true,
            ..Default::default()
        }
        .to_snapshot()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::test();
        assert_eq!(sim.frame, 0);
        assert!(sim.controller().is_grounded(), "Should spawn on the floor");
        assert!((sim.delta_time() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = Simulation::test();

        for _ in 0..10 {
            assert!(sim.tick(&InputSnapshot::default()).is_some());
        }

        assert_eq!(sim.frame, 10);
        assert!(sim.controller().is_grounded());
    }

    #[test]
    fn test_deactivated_controller_still_counts_frames() {
        let mut sim = Simulation::test();
        sim.controller_mut().on_deactivate();

        assert!(sim.tick(&run_right()).is_none());
        assert_eq!(sim.frame, 1);
    }

    #[test]
    fn test_running_moves_right() {
        let mut sim = Simulation::test();
        let start = sim.controller().position();

        for _ in 0..50 {
            sim.tick(&run_right());
        }

        assert!(sim.controller().position().x > start.x + 2.0);
        assert!(sim.controller().is_grounded());
    }

    #[test]
    fn test_determinism() {
        let script: Vec<InputSnapshot> = (0..200)
            .map(|i| InputSnapshot {
                move_axis: if i % 60 < 40 { 1.0 } else { -0.5 },
                jump: i % 45 < 10,
                dash: i % 70 == 5,
            })
            .collect();

        let mut a = Simulation::test();
        let mut b = Simulation::test();
        for input in &script {
            let outcome_a = a.tick(input);
            let outcome_b = b.tick(input);
            assert_eq!(outcome_a, outcome_b);
        }

        assert_eq!(a.controller().body(), b.controller().body());
    }

    #[test]
    fn test_jumps_up_through_one_way_platform() {
        let mut level = Level::new("test", "Test");
        level
            .collision
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(20.0, 0.5), LayerMask::TERRAIN);
        level.add_one_way_platform(Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.1));
        level.spawn_points.push(SpawnPoint {
            name: "start".to_string(),
            position: Vec2::new(0.0, 1.0),
        });
        let platform = level.one_way_platforms[0];

        let config = SimulationConfig {
            controller: ControllerConfig {
                jump_force: 14.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut sim = Simulation::new(config, level);
        let half_height = sim.config.body_shape.half_extents().y;

        let jump = InputSnapshot {
            jump: true,
            ..Default::default()
        };
        let mut highest = f32::MIN;
        for _ in 0..40 {
            sim.tick(&jump);
            highest = highest.max(sim.controller().position().y - half_height);
        }
        assert!(highest > platform.top, "Should rise above the platform, highest bottom={}", highest);

        for _ in 0..100 {
            sim.tick(&InputSnapshot::default());
        }
        let bottom = sim.controller().position().y - half_height;
        assert!(sim.controller().is_grounded());
        assert!(bottom >= platform.top, "Should land on the platform, bottom={}", bottom);
        assert!(!sim.controller().body().ignored.contains(platform.collider));
    }

    #[test]
    fn test_respawn_returns_to_start() {
        let mut sim = Simulation::test();
        for _ in 0..30 {
            sim.tick(&run_right());
        }

        sim.respawn();

        let start = sim.controller().position();
        assert!((start.x - sim.level.default_spawn().x).abs() < 1e-6);
        assert!(sim.controller().is_grounded());
        assert_eq!(sim.controller().velocity(), Vec2::ZERO);
        assert_eq!(sim.controller().horizontal_velocity(), 0.0);

        // Standing still on the next idle tick
        let outcome = sim.tick(&InputSnapshot::default()).unwrap();
        assert_eq!(outcome.position.x, start.x, "Should stay put after respawn");
        assert_eq!(outcome.velocity.x, 0.0);
        assert!(outcome.grounded);
    }

    #[test]
    fn test_respawn_ends_glide() {
        let mut sim = Simulation::test();
        for _ in 0..5 {
            sim.tick(&run_right());
        }
        sim.controller_mut().mover_mut().body_mut().grounded = false;
        assert!(sim.controller_mut().dash(1.0));
        assert!(!sim.controller().body().gravity_enabled);

        sim.respawn();

        assert!(!sim.controller().glide().is_active());
        assert!(sim.controller().body().gravity_enabled);
    }

    #[test]
    fn test_named_spawn() {
        let config = SimulationConfig {
            spawn: Some("plateau".to_string()),
            ..Default::default()
        };
        let sim = Simulation::new(config, Level::test_course());

        let bottom = sim.controller().position().y - 0.5;
        assert!(sim.controller().is_grounded());
        assert!((bottom - 3.2).abs() < 0.01, "Should stand on the plateau, bottom={}", bottom);
    }

    #[test]
    fn test_config_from_toml() {
        let config = SimulationConfig::from_toml_str(
            r#"
            tick_rate = 60

            [mover]
            skin_width = 0.1

            [controller]
            multi_jump = true
            extra_jumps = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.mover.skin_width, 0.1);
        assert_eq!(config.mover.gravity_modifier, 5.0);
        assert!(config.controller.multi_jump);
        assert_eq!(config.controller.extra_jumps, 3);
        assert_eq!(config.controller.speed, 8.0);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = SimulationConfig {
            spawn: Some("plateau".to_string()),
            ..Default::default()
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = SimulationConfig::from_toml_str(&text).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let zero_rate = SimulationConfig::from_toml_str("tick_rate = 0");
        assert!(matches!(zero_rate, Err(ConfigError::Invalid(_))));

        let no_skin = SimulationConfig::from_toml_str("[mover]\nskin_width = 0.0");
        assert!(matches!(no_skin, Err(ConfigError::Invalid(_))));

        let too_many_jumps = SimulationConfig::from_toml_str("[controller]\nextra_jumps = 5");
        assert!(matches!(too_many_jumps, Err(ConfigError::Invalid(_))));

        let garbage = SimulationConfig::from_toml_str("tick_rate = \"fast\"");
        assert!(matches!(garbage, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("platformer-config-{}.toml", std::process::id()));
        let config = SimulationConfig {
            tick_rate: 60,
            spawn: Some("plateau".to_string()),
            controller: ControllerConfig {
                multi_jump: true,
                extra_jumps: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_missing_config_file() {
        let result = SimulationConfig::load_from_file("/nonexistent/platformer.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_fixed_timestep_carries_remainder() {
        let mut timestep = FixedTimestep::new(4);

        assert_eq!(timestep.accumulate(0.625), 2);
        assert_eq!(timestep.alpha(), 0.5);

        assert_eq!(timestep.accumulate(0.125), 1);
        assert_eq!(timestep.alpha(), 0.0);

        assert_eq!(timestep.accumulate(0.1), 0);
    }

    #[test]
    fn test_fixed_timestep_never_drops_ticks() {
        let mut timestep = FixedTimestep::new(64);

        // A long hitch still produces every tick it covers
        assert_eq!(timestep.accumulate(1.0), 64);
        assert_eq!(timestep.accumulate(-1.0), 0);
    }

    #[test]
    fn test_fixed_timestep_ignores_bad_frame_times() {
        let mut timestep = FixedTimestep::new(4);
        timestep.accumulate(0.125);

        assert_eq!(timestep.accumulate(f64::INFINITY), 0);
        assert_eq!(timestep.accumulate(f64::NAN), 0);
        assert_eq!(timestep.alpha(), 0.5);
    }
}
