//! Repository port for families and memberships.

use crate::family::domain::{Family, FamilyId, InviteCode, Membership};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for family repository operations.
pub type FamilyRepositoryResult<T> = Result<T, FamilyRepositoryError>;

/// Family and membership persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Atomically stores a new family together with its founder's
    /// membership.
    ///
    /// Either both records become visible or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyRepositoryError::DuplicateInviteCode`] when another
    /// family holds the code at commit time,
    /// [`FamilyRepositoryError::AlreadyMember`] when the founder already
    /// belongs to a family, or [`FamilyRepositoryError::DuplicateFamily`]
    /// when the family ID exists.
    async fn create_with_founder(
        &self,
        family: &Family,
        founder: &Membership,
    ) -> FamilyRepositoryResult<()>;

    /// Adds a member to an existing family.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyRepositoryError::AlreadyMember`] when the user already
    /// belongs to any family or [`FamilyRepositoryError::FamilyNotFound`]
    /// when the family does not exist.
    async fn add_member(&self, membership: &Membership) -> FamilyRepositoryResult<()>;

    /// Finds a family by identifier.
    async fn find_by_id(&self, id: FamilyId) -> FamilyRepositoryResult<Option<Family>>;

    /// Finds the family holding an invite code.
    async fn find_by_invite_code(&self, code: &InviteCode)
    -> FamilyRepositoryResult<Option<Family>>;

    /// Finds the membership of a user, if they belong to a family.
    async fn find_membership(&self, user_id: UserId)
    -> FamilyRepositoryResult<Option<Membership>>;

    /// Returns the memberships of a family ordered by join time.
    async fn list_members(&self, family_id: FamilyId) -> FamilyRepositoryResult<Vec<Membership>>;
}

/// Errors returned by family repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FamilyRepositoryError {
    /// A family with the same identifier already exists.
    #[error("duplicate family identifier: {0}")]
    DuplicateFamily(FamilyId),

    /// Another family already holds the invite code.
    #[error("duplicate invite code: {0}")]
    DuplicateInviteCode(InviteCode),

    /// The user already belongs to a family.
    #[error("user {0} already belongs to a family")]
    AlreadyMember(UserId),

    /// The family was not found.
    #[error("family not found: {0}")]
    FamilyNotFound(FamilyId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FamilyRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
