//! Collision layers for cast filtering.
//!
//! Every collider lives on one or more layers, and every cast carries a mask
//! of the layers it is willing to hit.

use serde::{Deserialize, Serialize};

/// A bit mask of up to 32 collision layers.
///
/// Colliders use it to say which layers they occupy; casts use it to say
/// which layers they collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// General level geometry - floors, walls, slopes.
    pub const TERRAIN: Self = Self::layer(0);

    /// Pass-through platforms a body can be told to ignore.
    pub const PLATFORM: Self = Self::layer(8);

    /// Blockers the horizontal obstruction probe checks before moving.
    pub const OBSTRUCTION: Self = Self::layer(9);

    /// Standard mask for character bodies.
    pub const MASK_CHARACTER: Self = Self::TERRAIN.union(Self::PLATFORM).union(Self::OBSTRUCTION);

    /// Mask containing only the given layer index.
    ///
    /// Indices past 31 yield an empty mask.
    #[inline]
    pub const fn layer(index: u32) -> Self {
        if index < 32 {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Check if this mask contains every layer in `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if this mask shares any layer with `other`.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two masks.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove layers from this mask.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
