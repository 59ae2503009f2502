//! Level geometry and spawn points.

use glam::Vec2;
use platformer_physics::{ColliderId, CollisionWorld, LayerMask};
use serde::{Deserialize, Serialize};

/// A game level containing collision geometry and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Named spawn points. The first one is the default.
    pub spawn_points: Vec<SpawnPoint>,

    /// Platforms that can be jumped through from below.
    pub one_way_platforms: Vec<OneWayPlatform>,

    /// Trigger volumes.
    pub triggers: Vec<TriggerVolume>,
}

/// A named spawn point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Spawn point name.
    pub name: String,

    /// Position in world space.
    pub position: Vec2,
}

/// A platform that is only solid from above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneWayPlatform {
    /// The platform's collider.
    pub collider: ColliderId,

    /// World Y of the platform's top surface.
    pub top: f32,
}

impl OneWayPlatform {
    /// Check if a body with its lowest point at `bottom` should pass through.
    ///
    /// Anything whose feet are below the top surface is still on its way up
    /// (or walking underneath) and must not collide.
    #[inline]
    pub fn passes_through(&self, bottom: f32) -> bool {
        bottom < self.top
    }
}

/// A trigger volume that fires events when entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerVolume {
    /// Center position.
    pub position: Vec2,

    /// Half-extents of the trigger box.
    pub half_extents: Vec2,

    /// Trigger identifier for events.
    pub trigger_id: String,

    /// Whether this trigger can fire multiple times.
    pub repeatable: bool,

    /// Whether this trigger has been activated.
    pub activated: bool,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
            one_way_platforms: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Create a simple test course for development.
    ///
    /// Left to right: start area, a jump-through platform, a ramp up to a
    /// plateau, a crate on the obstruction layer and a goal trigger, walled
    /// in at both ends.
    pub fn test_course() -> Self {
        let mut level = Self::new("test_course", "Test Course");

        // Floor, top at y=0
        level
            .collision
            .add_box(Vec2::new(20.0, -0.5), Vec2::new(40.0, 0.5), LayerMask::TERRAIN);

        // Walls
        let wall_height = 10.0;
        level.collision.add_box(
            Vec2::new(-20.5, wall_height / 2.0),
            Vec2::new(0.5, wall_height / 2.0),
            LayerMask::TERRAIN,
        );
        level.collision.add_box(
            Vec2::new(60.5, wall_height / 2.0),
            Vec2::new(0.5, wall_height / 2.0),
            LayerMask::TERRAIN,
        );

        // Jump-through platform above the start
        level.add_one_way_platform(Vec2::new(4.0, 1.4), Vec2::new(1.5, 0.1));

        // Ramp rising 1:2 onto the plateau
        let ramp = level.collision.add_convex_hull(
            &[Vec2::new(10.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(16.0, 3.0)],
            LayerMask::TERRAIN,
        );
        if ramp.is_none() {
            log::warn!("test course ramp is degenerate");
        }

        // Plateau, top at y=3
        level
            .collision
            .add_box(Vec2::new(20.0, 1.5), Vec2::new(4.0, 1.5), LayerMask::TERRAIN);

        // Crate past the plateau
        level
            .collision
            .add_box(Vec2::new(30.0, 0.5), Vec2::new(0.5, 0.5), LayerMask::OBSTRUCTION);

        level.spawn_points.push(SpawnPoint {
            name: "start".to_string(),
            position: Vec2::new(0.0, 1.0),
        });
        level.spawn_points.push(SpawnPoint {
            name: "plateau".to_string(),
            position: Vec2::new(20.0, 4.0),
        });

        level.triggers.push(TriggerVolume {
            position: Vec2::new(50.0, 1.0),
            half_extents: Vec2::new(1.0, 1.0),
            trigger_id: "goal".to_string(),
            repeatable: false,
            activated: false,
        });

        level
    }

    /// Add a platform that is only solid from above.
    pub fn add_one_way_platform(&mut self, center: Vec2, half_extents: Vec2) -> ColliderId {
        let collider = self.collision.add_box(center, half_extents, LayerMask::PLATFORM);
        self.one_way_platforms.push(OneWayPlatform {
            collider,
            top: center.y + half_extents.y,
        });
        collider
    }

    /// Look up a spawn point by name.
    pub fn spawn(&self, name: &str) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|s| s.name == name)
    }

    /// Position of the default spawn point, or the origin if there is none.
    pub fn default_spawn(&self) -> Vec2 {
        self.spawn_points.first().map(|s| s.position).unwrap_or(Vec2::ZERO)
    }

    /// Check if a point is inside any trigger volume.
    pub fn check_triggers(&mut self, position: Vec2) -> Vec<String> {
        let mut triggered = Vec::new();

        for trigger in &mut self.triggers {
            if trigger.activated && !trigger.repeatable {
                continue;
            }

            let min = trigger.position - trigger.half_extents;
            let max = trigger.position + trigger.half_extents;

            if position.cmpge(min).all() && position.cmple(max).all() {
                trigger.activated = true;
                triggered.push(trigger.trigger_id.clone());
            }
        }

        triggered
    }
}
