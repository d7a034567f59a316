//! Personal and family lists and the tasks inside them.
//!
//! Lists and tasks share one bounded context so that a list and its tasks
//! are stored, and deleted, together. Visibility follows list ownership and
//! the owner's family membership from [`crate::family`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
