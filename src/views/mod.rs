//! Read-view invalidation contract.
//!
//! Every mutating service operation returns a [`Mutation`] naming the
//! read-views it made stale. Staleness is resolved by the caller's next
//! fetch; nothing is pushed to other sessions.

mod key;
mod mutation;
mod stale;

pub use key::{ListKind, ViewKey};
pub use mutation::Mutation;
pub use stale::StaleViews;
