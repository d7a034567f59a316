//! Domain model for families and their members.
//!
//! A family has exactly one admin, fixed at creation, and any number of
//! members admitted through its invite code. Roles are derived from the
//! family's admin reference rather than stored per member.

mod error;
mod family;
mod ids;
mod invite_code;
mod membership;

pub use error::FamilyDomainError;
pub use family::{Family, FamilyRole, PersistedFamilyData};
pub use ids::{FamilyId, FamilyName};
pub use invite_code::InviteCode;
pub use membership::Membership;
