//! Platformer - Main Entry Point
//!
//! Headless driver for the character controller. Loads an optional TOML
//! config, builds the test course and feeds a scripted run through the
//! fixed-tick loop, logging the player's progress.
//!
//! ```text
//! RUST_LOG=debug platformer [config.toml]
//! ```

use platformer_game::{
    ConfigError, DigitalInput, FixedTimestep, Level, Simulation, SimulationConfig,
};

/// Simulated display refresh rate driving the fixed-tick accumulator.
const FRAME_RATE: f64 = 60.0;

/// How many display frames the scripted run lasts.
const RUN_FRAMES: u64 = 600;

/// Log a status line every this many ticks.
const REPORT_INTERVAL: u64 = 25;

/// Key states for a given display frame of the scripted run.
fn scripted_input(frame: u64) -> DigitalInput {
    let mut keys = DigitalInput::default();

    match frame {
        // Stand still and settle
        0..=29 => {}
        // Run right, hop onto the jump-through platform
        30..=89 => {
            keys.right = true;
            keys.jump = (60..75).contains(&frame);
        }
        // Keep running, jump and dash in the air
        90..=179 => {
            keys.right = true;
            keys.jump = (120..130).contains(&frame);
            keys.dash = (126..128).contains(&frame);
        }
        // Up the ramp and over the plateau
        180..=419 => {
            keys.right = true;
        }
        // Back off from the crate
        420..=479 => {
            keys.left = true;
        }
        _ => {}
    }

    keys
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path);
            SimulationConfig::load_from_file(&path)?
        }
        None => SimulationConfig::default(),
    };

    let mut timestep = FixedTimestep::new(config.tick_rate);
    let mut simulation = Simulation::new(config, Level::test_course());

    for frame in 0..RUN_FRAMES {
        let input = scripted_input(frame).to_snapshot();

        for _ in 0..timestep.accumulate(1.0 / FRAME_RATE) {
            let Some(outcome) = simulation.tick(&input) else {
                continue;
            };

            if simulation.frame % REPORT_INTERVAL == 0 {
                log::info!(
                    "tick {:4}: pos=({:7.3}, {:7.3}) vel=({:7.3}, {:7.3}) grounded={}",
                    simulation.frame,
                    outcome.position.x,
                    outcome.position.y,
                    outcome.velocity.x,
                    outcome.velocity.y,
                    outcome.grounded
                );
            }
        }
    }

    let controller = simulation.controller();
    log::info!(
        "finished after {} ticks at {:?}, {} jumps spent, dash timer {:.2}s",
        simulation.frame,
        controller.position(),
        controller.jump_state().counter(),
        controller.dash_state().timer()
    );

    Ok(())
}
