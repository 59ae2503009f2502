//! Collision world containing all level geometry.
//!
//! The collision world stores every collider and answers shape-cast queries
//! through it.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::{cast_shapes, ShapeCastOptions};
use parry2d::shape::SharedShape;

use super::cast::{sort_hits, BodyShape, CastHit, ColliderId, ShapeCast, ShapeCaster};
use super::layers::LayerMask;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct Collider {
    /// Unique identifier for this collider.
    pub id: ColliderId,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space. Colliders never rotate.
    pub transform: Isometry<Real>,
    /// Layers this collider occupies.
    pub layers: LayerMask,
    /// Triggers are skipped by casts unless the filter asks for them.
    pub trigger: bool,
}

impl std::fmt::Debug for Collider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("id", &self.id)
            .field("translation", &self.transform.translation.vector)
            .field("layers", &self.layers)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

/// The collision world containing all colliders.
///
/// Supports:
/// - Axis-aligned boxes (floors, walls, platforms)
/// - Convex hulls (slopes and ramps)
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size along each axis
    /// * `layers` - Layers the box occupies
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: LayerMask) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        self.insert(shape, Isometry::translation(center.x, center.y), layers)
    }

    /// Add a convex hull to the world.
    ///
    /// Points are in world space.
    ///
    /// # Returns
    ///
    /// The collider ID, or `None` if the points don't span a hull.
    pub fn add_convex_hull(&mut self, points: &[Vec2], layers: LayerMask) -> Option<ColliderId> {
        let parry_points: Vec<Point<Real>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let shape = SharedShape::convex_hull(&parry_points)?;
        Some(self.insert(shape, Isometry::identity(), layers))
    }

    /// Mark a collider as a trigger (or back to solid).
    ///
    /// Returns `false` if no such collider exists.
    pub fn set_trigger(&mut self, id: ColliderId, trigger: bool) -> bool {
        match self.colliders.iter_mut().find(|c| c.id == id) {
            Some(collider) => {
                collider.trigger = trigger;
                true
            }
            None => false,
        }
    }

    /// Remove a collider. Returns `false` if no such collider exists.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Look up a collider by ID.
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Get the number of colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn insert(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: LayerMask) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;

        self.colliders.push(Collider {
            id,
            shape,
            transform,
            layers,
            trigger: false,
        });

        id
    }

    /// Create a parry2d shape from a body shape.
    fn parry_shape(shape: BodyShape) -> SharedShape {
        match shape {
            BodyShape::Box { half_extents } => SharedShape::cuboid(half_extents.x, half_extents.y),
            BodyShape::Capsule {
                radius,
                half_height,
            } => SharedShape::capsule_y(half_height, radius),
            BodyShape::Circle { radius } => SharedShape::ball(radius),
        }
    }
}

impl ShapeCaster for CollisionWorld {
    fn cast(&self, query: &ShapeCast<'_>, hits: &mut Vec<CastHit>) -> usize {
        if query.max_distance <= 0.0 {
            return 0;
        }

        let start = hits.len();
        let shape = Self::parry_shape(query.shape);
        let shape_pos = Isometry::translation(query.origin.x, query.origin.y);
        let shape_vel = Vector::new(query.direction.x, query.direction.y);
        let still = Vector::zeros();

        for collider in &self.colliders {
            if !query.filter.accepts(collider.id, collider.layers, collider.trigger) {
                continue;
            }

            // Unit velocity makes time of impact equal to travel distance.
            let options = ShapeCastOptions {
                max_time_of_impact: query.max_distance,
                target_distance: 0.0,
                stop_at_penetration: true,
                compute_impact_geometry_on_penetration: true,
            };

            match cast_shapes(
                &shape_pos,
                &shape_vel,
                shape.as_ref(),
                &collider.transform,
                &still,
                collider.shape.as_ref(),
                options,
            ) {
                Ok(Some(hit)) => {
                    let normal = collider.transform.rotation * hit.normal2.into_inner();
                    hits.push(CastHit {
                        normal: Vec2::new(normal.x, normal.y).normalize_or_zero(),
                        distance: hit.time_of_impact.max(0.0),
                        collider: collider.id,
                    });
                }
                Ok(None) => {}
                Err(_) => {
                    log::warn!("unsupported shape pair in cast against {:?}", collider.id);
                }
            }
        }

        sort_hits(&mut hits[start..]);
        hits.len() - start
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CastFilter, IgnoreSet};

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top at y=0
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), LayerMask::TERRAIN);

        // Wall with its left face at x=5
        world.add_box(Vec2::new(5.5, 2.0), Vec2::new(0.5, 2.0), LayerMask::TERRAIN);

        world
    }

    fn cast(world: &CollisionWorld, origin: Vec2, direction: Vec2, max: f32, filter: CastFilter<'_>) -> Vec<CastHit> {
        let mut hits = Vec::new();
        world.cast(
            &ShapeCast {
                shape: BodyShape::UNIT_BOX,
                origin,
                direction,
                max_distance: max,
                filter,
            },
            &mut hits,
        );
        hits
    }

    #[test]
    fn test_cast_down_hits_floor() {
        let world = create_test_world();

        let hits = cast(&world, Vec2::new(0.0, 2.0), -Vec2::Y, 5.0, CastFilter::default());

        assert_eq!(hits.len(), 1);
        // Box bottom starts at 1.5 above the floor top
        assert!((hits[0].distance - 1.5).abs() < 0.01, "distance={}", hits[0].distance);
        assert!((hits[0].normal - Vec2::Y).length() < 0.01, "normal={:?}", hits[0].normal);
    }

    #[test]
    fn test_cast_towards_wall() {
        let world = create_test_world();

        let hits = cast(&world, Vec2::new(0.0, 1.0), Vec2::X, 10.0, CastFilter::default());

        assert_eq!(hits.len(), 1);
        // Box right face starts at 0.5, wall face at 5.0
        assert!((hits[0].distance - 4.5).abs() < 0.01, "distance={}", hits[0].distance);
        assert!(hits[0].normal.x < -0.99);
    }

    #[test]
    fn test_cast_miss_beyond_max_distance() {
        let world = create_test_world();

        let hits = cast(&world, Vec2::new(0.0, 1.0), Vec2::X, 2.0, CastFilter::default());

        assert!(hits.is_empty());
    }

    #[test]
    fn test_cast_returns_hits_nearest_first() {
        let mut world = create_test_world();
        // A thin post in front of the wall
        world.add_box(Vec2::new(3.0, 1.0), Vec2::new(0.1, 1.0), LayerMask::TERRAIN);

        let hits = cast(&world, Vec2::new(0.0, 1.0), Vec2::X, 10.0, CastFilter::default());

        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn test_cast_skips_ignored_and_masked_colliders() {
        let mut world = CollisionWorld::new();
        let platform = world.add_box(Vec2::new(0.0, -0.5), Vec2::new(5.0, 0.5), LayerMask::PLATFORM);

        let mut ignore = IgnoreSet::new();
        ignore.add(platform);

        let ignored = cast(
            &world,
            Vec2::new(0.0, 2.0),
            -Vec2::Y,
            5.0,
            CastFilter::new(LayerMask::ALL).ignoring(&ignore),
        );
        assert!(ignored.is_empty());

        let masked = cast(&world, Vec2::new(0.0, 2.0), -Vec2::Y, 5.0, CastFilter::new(LayerMask::TERRAIN));
        assert!(masked.is_empty());
    }

    #[test]
    fn test_cast_skips_triggers() {
        let mut world = CollisionWorld::new();
        let zone = world.add_box(Vec2::new(3.0, 1.0), Vec2::new(0.5, 1.0), LayerMask::TERRAIN);
        assert!(world.set_trigger(zone, true));

        let hits = cast(&world, Vec2::new(0.0, 1.0), Vec2::X, 10.0, CastFilter::default());
        assert!(hits.is_empty());

        let mut filter = CastFilter::default();
        filter.include_triggers = true;
        let hits = cast(&world, Vec2::new(0.0, 1.0), Vec2::X, 10.0, filter);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_slope_normal() {
        let mut world = CollisionWorld::new();
        // Ramp rising to the right at 2:1
        world
            .add_convex_hull(
                &[Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 2.0)],
                LayerMask::TERRAIN,
            )
            .unwrap();

        let hits = cast(&world, Vec2::new(2.0, 3.0), -Vec2::Y, 5.0, CastFilter::default());

        assert_eq!(hits.len(), 1);
        let expected = Vec2::new(-1.0, 2.0).normalize();
        assert!((hits[0].normal - expected).length() < 0.05, "normal={:?}", hits[0].normal);
    }

    #[test]
    fn test_remove_collider() {
        let mut world = create_test_world();
        let id = world.add_box(Vec2::ZERO, Vec2::ONE, LayerMask::TERRAIN);

        assert!(world.collider(id).is_some());
        assert!(world.remove(id));
        assert!(!world.remove(id));
        assert_eq!(world.collider_count(), 2);
    }
}
