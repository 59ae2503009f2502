//! Shape casts and the query trait the mover sweeps through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ignore::IgnoreSet;
use super::layers::LayerMask;

/// Stable identity of a collider in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// One obstacle found along a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastHit {
    /// Outward surface normal of the obstacle at the contact point.
    ///
    /// Points back towards the casting shape.
    pub normal: Vec2,

    /// Distance travelled along the cast direction before contact.
    ///
    /// `0.0` means the shape was already touching or overlapping.
    pub distance: f32,

    /// The collider that was hit.
    pub collider: ColliderId,
}

/// Shape of a kinematic body.
///
/// All shapes are centred on the body position and never rotate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    /// An axis-aligned box.
    Box {
        /// Half-size along each axis.
        half_extents: Vec2,
    },

    /// A vertical capsule.
    Capsule {
        /// Radius of the end caps.
        radius: f32,
        /// Half-length of the straight section between the caps.
        half_height: f32,
    },

    /// A circle.
    Circle {
        /// Circle radius.
        radius: f32,
    },
}

impl BodyShape {
    /// One-unit box, the default character size.
    pub const UNIT_BOX: Self = Self::Box {
        half_extents: Vec2::splat(0.5),
    };

    /// Half-size of the axis-aligned box that bounds this shape.
    pub fn half_extents(&self) -> Vec2 {
        match self {
            Self::Box { half_extents } => *half_extents,
            Self::Capsule {
                radius,
                half_height,
            } => Vec2::new(*radius, half_height + radius),
            Self::Circle { radius } => Vec2::splat(*radius),
        }
    }

    /// The box that bounds this shape, as a cast shape of its own.
    ///
    /// The obstruction probe always casts a box regardless of body shape.
    pub fn bounding_box(&self) -> Self {
        Self::Box {
            half_extents: self.half_extents(),
        }
    }
}

impl Default for BodyShape {
    fn default() -> Self {
        Self::UNIT_BOX
    }
}

/// Which colliders a cast is allowed to hit.
#[derive(Debug, Clone, Copy)]
pub struct CastFilter<'a> {
    /// Layers the cast collides with.
    pub mask: LayerMask,

    /// Whether trigger colliders produce hits.
    pub include_triggers: bool,

    /// Colliders skipped entirely.
    pub ignore: Option<&'a IgnoreSet>,
}

impl<'a> CastFilter<'a> {
    /// Filter that hits solid colliders on the given layers.
    pub fn new(mask: LayerMask) -> Self {
        Self {
            mask,
            include_triggers: false,
            ignore: None,
        }
    }

    /// Skip every collider in `ignore`.
    pub fn ignoring(mut self, ignore: &'a IgnoreSet) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Check if a collider passes this filter.
    pub fn accepts(&self, id: ColliderId, layers: LayerMask, is_trigger: bool) -> bool {
        if !self.mask.intersects(layers) {
            return false;
        }
        if is_trigger && !self.include_triggers {
            return false;
        }
        !self.ignore.is_some_and(|ignore| ignore.contains(id))
    }
}

impl Default for CastFilter<'_> {
    fn default() -> Self {
        Self::new(LayerMask::ALL)
    }
}

/// A single sweep request.
#[derive(Debug, Clone, Copy)]
pub struct ShapeCast<'a> {
    /// Shape being swept.
    pub shape: BodyShape,

    /// Centre of the shape at the start of the sweep.
    pub origin: Vec2,

    /// Sweep direction. Must be unit length.
    pub direction: Vec2,

    /// How far to sweep.
    pub max_distance: f32,

    /// Which colliders may be hit.
    pub filter: CastFilter<'a>,
}

/// Anything that can answer shape-cast queries.
///
/// [`super::CollisionWorld`] is the stock implementation; tests and hosts
/// with their own collision backend can provide another.
pub trait ShapeCaster {
    /// Sweep a shape and append every hit to `hits`.
    ///
    /// Hits are appended nearest-first, ties broken by collider id. Returns
    /// the number of hits appended. `hits` is not cleared first.
    fn cast(&self, query: &ShapeCast<'_>, hits: &mut Vec<CastHit>) -> usize;
}

/// Sort hits nearest-first with a stable collider-id tie-break.
pub(crate) fn sort_hits(hits: &mut [CastHit]) {
    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.collider.cmp(&b.collider))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_respects_mask_triggers_and_ignore() {
        let mut ignore = IgnoreSet::new();
        ignore.add(ColliderId(2));

        let filter = CastFilter::new(LayerMask::TERRAIN).ignoring(&ignore);

        assert!(filter.accepts(ColliderId(1), LayerMask::TERRAIN, false));
        assert!(!filter.accepts(ColliderId(1), LayerMask::PLATFORM, false));
        assert!(!filter.accepts(ColliderId(1), LayerMask::TERRAIN, true));
        assert!(!filter.accepts(ColliderId(2), LayerMask::TERRAIN, false));
    }

    #[test]
    fn test_sort_hits_breaks_ties_by_id() {
        let mut hits = vec![
            CastHit { normal: Vec2::Y, distance: 0.5, collider: ColliderId(4) },
            CastHit { normal: Vec2::X, distance: 0.2, collider: ColliderId(9) },
            CastHit { normal: Vec2::Y, distance: 0.5, collider: ColliderId(1) },
        ];

        sort_hits(&mut hits);

        let order: Vec<u32> = hits.iter().map(|h| h.collider.0).collect();
        assert_eq!(order, vec![9, 1, 4]);
    }

    #[test]
    fn test_shape_half_extents() {
        let capsule = BodyShape::Capsule {
            radius: 0.25,
            half_height: 0.5,
        };
        assert_eq!(capsule.half_extents(), Vec2::new(0.25, 0.75));
        assert_eq!(
            capsule.bounding_box(),
            BodyShape::Box { half_extents: Vec2::new(0.25, 0.75) }
        );
    }
}
