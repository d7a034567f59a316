//! Mutation results carrying their invalidated views.

use super::ViewKey;

/// Outcome of a mutating operation together with the read-views it made
/// stale.
///
/// Invalidated keys are deduplicated and kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Mutation<T> {
    value: T,
    invalidated: Vec<ViewKey>,
}

impl<T> Mutation<T> {
    /// Wraps a mutation result with the views it invalidates.
    pub fn new(value: T, invalidated: impl IntoIterator<Item = ViewKey>) -> Self {
        let mut keys: Vec<ViewKey> = Vec::new();
        for key in invalidated {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self {
            value,
            invalidated: keys,
        }
    }

    /// Returns the mutation result.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the views that must be refetched before being trusted again.
    #[must_use]
    pub fn invalidated(&self) -> &[ViewKey] {
        &self.invalidated
    }

    /// Returns `true` when the given view was invalidated.
    #[must_use]
    pub fn invalidates(&self, key: &ViewKey) -> bool {
        self.invalidated.contains(key)
    }

    /// Consumes the mutation, returning the result.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Consumes the mutation, returning the result and invalidated views.
    pub fn into_parts(self) -> (T, Vec<ViewKey>) {
        (self.value, self.invalidated)
    }

    /// Maps the result while keeping the invalidated views.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        Mutation {
            value: f(self.value),
            invalidated: self.invalidated,
        }
    }
}
