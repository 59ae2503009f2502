//! Platformer character controller.
//!
//! This is the main entry point for player movement. It turns each tick's
//! input snapshot into jumps, dashes and a horizontal target velocity, then
//! steps its mover through the collision world.

use std::f32::consts::PI;

use glam::Vec2;
use platformer_physics::{
    Body, CastFilter, CastHit, ColliderId, KinematicMover, Movable, ShapeCast, ShapeCaster,
    StepOutcome,
};

use crate::config::ControllerConfig;
use crate::dash::DashState;
use crate::glide::GlideTimer;
use crate::input::{InputEdges, InputSnapshot};
use crate::jump::{JumpAction, JumpState};

/// Move `current` towards `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let difference = target - current;
    if difference.abs() <= max_delta {
        target
    } else {
        current + difference.signum() * max_delta
    }
}

/// Player character controller.
///
/// Handles:
/// - Horizontal acceleration with separate ground and air rates
/// - Jumping, hang-time boost and multi-jump
/// - Dashing, with a gravity-free glide when airborne
/// - Probing ahead for obstruction-layer blockers
///
/// The physical body lives in the wrapped [`Movable`]; the controller only
/// writes intent into it.
///
/// # Example
///
/// ```ignore
/// let mut controller = CharacterController::new(ControllerConfig::default(), mover);
///
/// // Each fixed tick:
/// controller.tick(&world, &input, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController<M: Movable = KinematicMover> {
    /// Controller configuration.
    pub config: ControllerConfig,
    mover: M,
    jump: JumpState,
    dash: DashState,
    glide: GlideTimer,
    /// Horizontal velocity being ramped towards the input target.
    input_velocity: f32,
    /// Last tick's input. `None` takes the next snapshot as the baseline,
    /// so buttons held across a resume don't register as presses.
    previous_input: Option<InputSnapshot>,
    active: bool,
    probe_hits: Vec<CastHit>,
}

impl<M: Movable> CharacterController<M> {
    /// Create an active controller driving `mover`.
    pub fn new(config: ControllerConfig, mover: M) -> Self {
        Self {
            config,
            mover,
            jump: JumpState::new(),
            dash: DashState::new(),
            glide: GlideTimer::new(),
            input_velocity: 0.0,
            previous_input: Some(InputSnapshot::default()),
            active: true,
            probe_hits: Vec::new(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Resume ticking. Buttons already held when ticking resumes are
    /// ignored until released.
    pub fn on_activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.previous_input = None;
        self.jump.clear_input();
        log::debug!("controller activated");
    }

    /// Stop ticking. A pending glide is dropped and gravity restored.
    pub fn on_deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.previous_input = None;
        self.jump.clear_input();
        self.end_glide();
        log::debug!("controller deactivated");
    }

    /// Bring the controller to rest: no horizontal speed, no glide and no
    /// held buttons. Dash cooldown and jump budget carry over.
    pub fn reset(&mut self) {
        self.input_velocity = 0.0;
        self.previous_input = None;
        self.jump.clear_input();
        self.end_glide();
    }

    fn end_glide(&mut self) {
        if self.glide.cancel() {
            self.mover.set_gravity_enabled(true);
        }
    }

    /// Whether [`Self::tick`] does anything.
    pub fn is_active(&self) -> bool {
        self.active
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Run one fixed tick.
    ///
    /// Returns the mover's outcome, or `None` while deactivated.
    ///
    /// # Arguments
    ///
    /// * `caster` - The collision world
    /// * `input` - Input state sampled for this tick
    /// * `delta_time` - Tick length in seconds
    pub fn tick(&mut self, caster: &dyn ShapeCaster, input: &InputSnapshot, delta_time: f32) -> Option<StepOutcome> {
        if !self.active {
            return None;
        }

        let input = input.sanitized();
        let previous = self.previous_input.unwrap_or(input);
        let edges = InputEdges::between(&previous, &input);
        self.previous_input = Some(input);

        if edges.jump_pressed {
            self.jump.press();
        }
        if edges.jump_released {
            self.jump.release();
        }

        if self.glide.advance(delta_time) {
            self.mover.set_gravity_enabled(true);
            log::debug!("glide ended");
        }

        self.update_jump(delta_time);

        if edges.dash_pressed {
            self.dash(input.move_axis);
        }

        self.update_horizontal(&input, delta_time);
        self.check_obstruction(caster);

        self.dash.advance(delta_time);

        Some(self.mover.step(caster, self.input_velocity, delta_time))
    }

    // ========================================================================
    // Jumping
    // ========================================================================

    fn update_jump(&mut self, delta_time: f32) {
        let grounded = self.mover.is_grounded();

        match self.jump.update(grounded, &self.config, delta_time) {
            JumpAction::Jump | JumpAction::ExtraJump => {
                self.mover.set_vertical_velocity(self.config.jump_force);
                log::debug!("jump {}", self.jump.counter());
            }
            JumpAction::Hang => {
                let boosted = self.mover.velocity().y + self.config.jump_force * PI * delta_time;
                self.mover.set_vertical_velocity(boosted);
            }
            JumpAction::None => {}
        }
    }

    // ========================================================================
    // Dashing
    // ========================================================================

    /// Try to dash in the direction of `move_axis`.
    ///
    /// Refused unless dashing is enabled, the cooldown has elapsed, the body
    /// is already moving horizontally and the axis picks a direction.
    /// Returns whether the dash happened.
    pub fn dash(&mut self, move_axis: f32) -> bool {
        if !self.config.can_dash
            || !self.dash.ready(self.config.dash_cooldown)
            || self.input_velocity == 0.0
            || move_axis == 0.0
        {
            return false;
        }

        self.input_velocity = self.config.dash_speed.copysign(move_axis);
        self.dash.reset();

        if !self.mover.is_grounded() {
            if self.glide.start(self.config.glide_time) {
                log::debug!("glide restarted");
            }
            self.mover.set_gravity_enabled(false);
        }

        log::debug!("dash velocity={}", self.input_velocity);
        true
    }

    // ========================================================================
    // Horizontal movement
    // ========================================================================

    fn update_horizontal(&mut self, input: &InputSnapshot, delta_time: f32) {
        let grounded = self.mover.is_grounded();
        let rate = self.config.ramp_rate(grounded, input.has_movement());

        self.input_velocity = move_towards(
            self.input_velocity,
            input.move_axis * self.config.speed,
            rate * delta_time,
        );
    }

    /// Don't apply velocity if walking into a blocker unless it's ignored.
    fn check_obstruction(&mut self, caster: &dyn ShapeCaster) {
        if self.input_velocity == 0.0 {
            return;
        }

        let body = self.mover.body();
        let query = ShapeCast {
            shape: body.shape.bounding_box(),
            origin: body.position,
            direction: Vec2::new(self.input_velocity.signum(), 0.0),
            max_distance: self.mover.config().skin_width,
            filter: CastFilter::new(self.config.obstruction_mask).ignoring(&body.ignored),
        };

        self.probe_hits.clear();
        if caster.cast(&query, &mut self.probe_hits) > 0 {
            log::trace!("blocked by {:?}", self.probe_hits[0].collider);
            self.input_velocity = 0.0;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Start passing through a collider.
    pub fn add_to_ignore_list(&mut self, id: ColliderId) -> bool {
        self.mover.add_to_ignore_list(id)
    }

    /// Stop passing through a collider.
    pub fn remove_from_ignore_list(&mut self, id: ColliderId) -> bool {
        self.mover.remove_from_ignore_list(id)
    }

    /// The wrapped mover.
    pub fn mover(&self) -> &M {
        &self.mover
    }

    /// Mutable access to the wrapped mover.
    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }

    /// Current body state.
    pub fn body(&self) -> &Body {
        self.mover.body()
    }

    /// Position in world space.
    pub fn position(&self) -> Vec2 {
        self.mover.position()
    }

    /// Velocity in world space after the last step.
    pub fn velocity(&self) -> Vec2 {
        self.mover.velocity()
    }

    /// Whether the last step touched ground.
    pub fn is_grounded(&self) -> bool {
        self.mover.is_grounded()
    }

    /// Horizontal velocity the next step will be asked for.
    pub fn horizontal_velocity(&self) -> f32 {
        self.input_velocity
    }

    /// Jump state.
    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    /// Dash cooldown state.
    pub fn dash_state(&self) -> &DashState {
        &self.dash
    }

    /// Glide window state.
    pub fn glide(&self) -> &GlideTimer {
        &self.glide
    }
}

// ============================================================================
// Tests
// ============================================================================
