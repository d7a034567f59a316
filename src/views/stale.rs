//! Per-session staleness tracking for read-views.

use super::{Mutation, ViewKey};
use std::collections::HashSet;

/// Tracks which read-views a session may trust.
///
/// A view is trusted only after it has been fetched and not invalidated
/// since. Each session owns its own tracker; invalidations from other
/// sessions are never observed directly.
#[derive(Debug, Clone, Default)]
pub struct StaleViews {
    fresh: HashSet<ViewKey>,
}

impl StaleViews {
    /// Creates a tracker in which every view is stale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful fetch of `key`.
    pub fn mark_fetched(&mut self, key: ViewKey) {
        self.fresh.insert(key);
    }

    /// Marks the given views stale.
    pub fn invalidate<'a>(&mut self, keys: impl IntoIterator<Item = &'a ViewKey>) {
        for key in keys {
            self.fresh.remove(key);
        }
    }

    /// Applies the invalidations declared by a mutation and returns its value.
    pub fn apply<T>(&mut self, mutation: Mutation<T>) -> T {
        let (value, invalidated) = mutation.into_parts();
        self.invalidate(&invalidated);
        value
    }

    /// Returns `true` when `key` must be refetched before use.
    #[must_use]
    pub fn is_stale(&self, key: &ViewKey) -> bool {
        !self.fresh.contains(key)
    }
}
