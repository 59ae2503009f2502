//! Kinematic sweep-and-slide mover.
//!
//! This is the main entry point for body physics. Each step integrates
//! gravity, then sweeps the body along the ground tangent and along world Y
//! in two separate passes, clipping each pass against whatever it hits.

use glam::Vec2;

use crate::collision::{CastFilter, CastHit, ColliderId, ShapeCast, ShapeCaster};

use super::body::Body;
use super::config::MoverConfig;
use super::slide::{clip_velocity, surface_tangent};

/// Result of a single mover step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Position after both sweeps.
    pub position: Vec2,
    /// Velocity after gravity and collision response.
    pub velocity: Vec2,
    /// Normal of the floor contact, if grounded.
    pub ground_normal: Vec2,
    /// Whether either sweep touched ground.
    pub grounded: bool,
}

/// Capability to be driven as a kinematic body.
///
/// Controllers own something `Movable` and talk to it only through this
/// trait: write the desired motion, step it, read the result back.
pub trait Movable {
    /// Advance the body by one fixed step.
    ///
    /// `target_velocity_x` replaces the horizontal velocity before the sweep;
    /// vertical velocity is carried over and integrated with gravity.
    fn step(&mut self, caster: &dyn ShapeCaster, target_velocity_x: f32, delta_time: f32) -> StepOutcome;

    /// Current body state.
    fn body(&self) -> &Body;

    /// Sweep configuration.
    fn config(&self) -> &MoverConfig;

    /// Overwrite vertical velocity (jumps).
    fn set_vertical_velocity(&mut self, velocity_y: f32);

    /// Enable or suspend gravity integration.
    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Start passing through a collider. Returns `false` if already ignored.
    fn add_to_ignore_list(&mut self, id: ColliderId) -> bool;

    /// Stop passing through a collider. Returns `false` if it wasn't ignored.
    fn remove_from_ignore_list(&mut self, id: ColliderId) -> bool;

    /// Position in world space.
    #[inline]
    fn position(&self) -> Vec2 {
        self.body().position
    }

    /// Velocity in world space.
    #[inline]
    fn velocity(&self) -> Vec2 {
        self.body().velocity
    }

    /// Whether the last step touched ground.
    #[inline]
    fn is_grounded(&self) -> bool {
        self.body().grounded
    }
}

/// The stock [`Movable`] implementation.
///
/// # Example
///
/// ```ignore
/// let mut mover = KinematicMover::new(MoverConfig::default(), Body::new(spawn, BodyShape::UNIT_BOX));
///
/// // Each fixed tick:
/// let outcome = mover.step(&world, target_x, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct KinematicMover {
    /// Sweep configuration.
    pub config: MoverConfig,
    body: Body,
    hits: Vec<CastHit>,
}

impl KinematicMover {
    /// Create a mover for the given body.
    pub fn new(config: MoverConfig, body: Body) -> Self {
        Self {
            config,
            body,
            hits: Vec::with_capacity(16),
        }
    }

    /// Mutable access to the body, for teleports and tests.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Place the body at a spawn point, dropping it onto ground below.
    ///
    /// Casts down from `spawn` up to `max_drop`. If ground is found the body
    /// rests a skin width above it and starts grounded; otherwise it is left
    /// at `spawn` airborne.
    pub fn spawn_at(&mut self, caster: &dyn ShapeCaster, spawn: Vec2, max_drop: f32) {
        self.body.position = spawn;
        self.body.velocity = Vec2::ZERO;
        self.body.grounded = false;
        self.body.ground_normal = Vec2::Y;

        self.hits.clear();
        let query = ShapeCast {
            shape: self.body.shape,
            origin: spawn,
            direction: -Vec2::Y,
            max_distance: max_drop,
            filter: CastFilter::new(self.config.collision_mask).ignoring(&self.body.ignored),
        };
        caster.cast(&query, &mut self.hits);

        if let Some(hit) = self.hits.iter().find(|h| self.config.is_ground(h.normal)) {
            let drop = (hit.distance - self.config.skin_width).max(0.0);
            self.body.position.y -= drop;
            self.body.grounded = true;
            self.body.ground_normal = hit.normal;
        }

        log::debug!(
            "spawned at {:?} grounded={}",
            self.body.position,
            self.body.grounded
        );
    }

    fn outcome(&self) -> StepOutcome {
        StepOutcome {
            position: self.body.position,
            velocity: self.body.velocity,
            ground_normal: self.body.ground_normal,
            grounded: self.body.grounded,
        }
    }

    // ========================================================================
    // Sweep
    // ========================================================================

    /// Sweep the body along `movement`, clipping against every hit.
    ///
    /// Hits arrive nearest-first. Only the nearest floor contact of a
    /// vertical sweep becomes the ground normal.
    fn sweep(&mut self, caster: &dyn ShapeCaster, movement: Vec2, vertical: bool) {
        let mut distance = movement.length();
        if distance <= self.config.min_move_distance {
            return;
        }
        let direction = movement / distance;
        let skin = self.config.skin_width;

        self.hits.clear();
        let query = ShapeCast {
            shape: self.body.shape,
            origin: self.body.position,
            direction,
            max_distance: distance + skin,
            filter: CastFilter::new(self.config.collision_mask).ignoring(&self.body.ignored),
        };
        caster.cast(&query, &mut self.hits);

        let mut ground_recorded = false;
        for hit in &self.hits {
            let mut normal = hit.normal;

            if self.config.is_ground(normal) {
                self.body.grounded = true;

                if vertical {
                    if !ground_recorded {
                        self.body.ground_normal = normal;
                        ground_recorded = true;
                    }
                    normal.x = 0.0;
                }
            }

            self.body.velocity = clip_velocity(self.body.velocity, normal);
            distance = distance.min(hit.distance - skin);

            log::trace!(
                "{} sweep hit {:?} at {:.4} normal={:?}",
                if vertical { "vertical" } else { "horizontal" },
                hit.collider,
                hit.distance,
                hit.normal
            );
        }

        self.body.position += direction * distance.max(0.0);
    }
}

impl Movable for KinematicMover {
    fn step(&mut self, caster: &dyn ShapeCaster, target_velocity_x: f32, delta_time: f32) -> StepOutcome {
        if self.body.gravity_enabled {
            self.body.velocity += self.config.gravity_delta(delta_time);
        } else {
            self.body.velocity.y = self.config.gravity_disabled_fall_speed;
        }
        self.body.velocity.x = target_velocity_x;

        // Limit how fast the body can fall
        if self.body.velocity.y < self.config.max_fall_speed {
            self.body.velocity.y = self.config.max_fall_speed;
        }

        let delta_position = self.body.velocity * delta_time;

        // Follow the slope while grounded
        let ground_direction = if self.body.grounded {
            surface_tangent(self.body.ground_normal)
        } else {
            Vec2::X
        };

        let was_grounded = self.body.grounded;
        self.body.grounded = false;

        self.sweep(caster, ground_direction * delta_position.x, false);
        self.sweep(caster, Vec2::new(0.0, delta_position.y), true);

        if was_grounded != self.body.grounded {
            log::debug!(
                "{} at {:?} velocity={:?}",
                if self.body.grounded { "landed" } else { "left ground" },
                self.body.position,
                self.body.velocity
            );
        }

        self.outcome()
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn config(&self) -> &MoverConfig {
        &self.config
    }

    fn set_vertical_velocity(&mut self, velocity_y: f32) {
        self.body.velocity.y = velocity_y;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.body.gravity_enabled = enabled;
    }

    fn add_to_ignore_list(&mut self, id: ColliderId) -> bool {
        self.body.ignored.add(id)
    }

    fn remove_from_ignore_list(&mut self, id: ColliderId) -> bool {
        self.body.ignored.remove(id)
    }
}

// ============================================================================
// Tests
// ============================================================================
