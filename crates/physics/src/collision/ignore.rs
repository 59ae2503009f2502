//! Per-body collider exclusion.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::cast::ColliderId;

/// Colliders a body passes straight through.
///
/// Used for one-way platforms: gameplay code adds the platform while the
/// body should drop or jump through it and removes it once clear. Adding
/// and removing are idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreSet {
    ids: HashSet<ColliderId>,
}

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ignoring a collider. Returns `false` if it was already ignored.
    pub fn add(&mut self, id: ColliderId) -> bool {
        self.ids.insert(id)
    }

    /// Stop ignoring a collider. Returns `false` if it was not ignored.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        self.ids.remove(&id)
    }

    /// Check if a collider is ignored.
    #[inline]
    pub fn contains(&self, id: ColliderId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of ignored colliders.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Stop ignoring everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Iterate the ignored colliders in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ColliderId> + '_ {
        self.ids.iter().copied()
    }
}
