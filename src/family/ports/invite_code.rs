//! Invite code generation port.

use crate::family::domain::{FamilyDomainError, InviteCode};

/// Source of candidate invite codes.
///
/// Candidates are not guaranteed unique; uniqueness is enforced when the
/// family is committed.
#[cfg_attr(test, mockall::automock)]
pub trait InviteCodeGenerator: Send + Sync {
    /// Produces a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyDomainError`] when the generator is misconfigured.
    fn generate(&self) -> Result<InviteCode, FamilyDomainError>;
}
