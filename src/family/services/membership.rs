//! Family creation, joining, and roster queries.

use crate::family::{
    domain::{Family, FamilyDomainError, FamilyId, FamilyName, FamilyRole, InviteCode, Membership},
    ports::{FamilyRepository, FamilyRepositoryError, InviteCodeGenerator},
};
use crate::identity::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::views::{Mutation, ViewKey};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of invite codes tried before family creation gives up.
pub const MAX_INVITE_CODE_ATTEMPTS: usize = 16;

/// Service-level errors for family membership operations.
#[derive(Debug, Error)]
pub enum FamilyMembershipError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FamilyDomainError),
    /// Family repository operation failed.
    #[error(transparent)]
    Repository(#[from] FamilyRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The user already belongs to a family.
    #[error("User is already part of a family")]
    AlreadyInFamily,
    /// The presented invite code resolves to no family.
    #[error("Invalid invite code")]
    InvalidInviteCode,
    /// The user does not belong to any family.
    #[error("User is not part of a family")]
    NotInFamily,
    /// The requester is not a member of the family.
    #[error("Not enough permissions")]
    Forbidden,
    /// The family does not exist.
    #[error("Family not found")]
    FamilyNotFound(FamilyId),
    /// Every generated invite code collided with an existing family.
    #[error("could not mint a unique invite code after {attempts} attempts")]
    InviteCodeSpaceExhausted {
        /// Number of candidates tried.
        attempts: usize,
    },
}

/// Result type for family membership operations.
pub type FamilyMembershipResult<T> = Result<T, FamilyMembershipError>;

/// Views that change when the caller gains a family.
const MEMBERSHIP_VIEWS: [ViewKey; 3] = [
    ViewKey::FamilyMembers,
    ViewKey::PersonalLists,
    ViewKey::FamilyLists,
];

/// Family formation and roster service.
#[derive(Clone)]
pub struct FamilyMembershipService<F, U, G, C>
where
    F: FamilyRepository,
    U: UserRepository,
    G: InviteCodeGenerator,
    C: Clock + Send + Sync,
{
    families: Arc<F>,
    users: Arc<U>,
    codes: Arc<G>,
    clock: Arc<C>,
}

impl<F, U, G, C> FamilyMembershipService<F, U, G, C>
where
    F: FamilyRepository,
    U: UserRepository,
    G: InviteCodeGenerator,
    C: Clock + Send + Sync,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(families: Arc<F>, users: Arc<U>, codes: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            families,
            users,
            codes,
            clock,
        }
    }

    /// Founds a family with `user` as its admin.
    ///
    /// A fresh invite code is minted for the family. Candidates already held
    /// by another family are discarded, both when looked up beforehand and
    /// when the store rejects them at commit.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::AlreadyInFamily`] when the user
    /// belongs to a family, [`FamilyMembershipError::Domain`] for an invalid
    /// name, or [`FamilyMembershipError::InviteCodeSpaceExhausted`] when no
    /// unique code was found.
    pub async fn create_family(
        &self,
        user: &User,
        name: impl Into<String> + Send,
    ) -> FamilyMembershipResult<Mutation<Family>> {
        let family_name = FamilyName::new(name)?;
        if self.families.find_membership(user.id()).await?.is_some() {
            return Err(FamilyMembershipError::AlreadyInFamily);
        }

        for attempt in 1..=MAX_INVITE_CODE_ATTEMPTS {
            let code = self.codes.generate()?;
            if self.families.find_by_invite_code(&code).await?.is_some() {
                warn!(attempt, "invite code already taken, regenerating");
                continue;
            }

            let family = Family::found(family_name.clone(), user.id(), code, &*self.clock);
            let founder = Membership::begin(user.id(), family.id(), &*self.clock);
            match self.families.create_with_founder(&family, &founder).await {
                Ok(()) => {
                    info!(family_id = %family.id(), admin_id = %user.id(), "family created");
                    return Ok(Mutation::new(family, MEMBERSHIP_VIEWS));
                }
                Err(FamilyRepositoryError::DuplicateInviteCode(_)) => {
                    warn!(attempt, "invite code collided at commit, regenerating");
                }
                Err(FamilyRepositoryError::AlreadyMember(_)) => {
                    return Err(FamilyMembershipError::AlreadyInFamily);
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(FamilyMembershipError::InviteCodeSpaceExhausted {
            attempts: MAX_INVITE_CODE_ATTEMPTS,
        })
    }

    /// Admits `user` into the family holding `invite_code` as a member.
    ///
    /// The code is not consumed and may be presented again by other users.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::AlreadyInFamily`] when the user
    /// belongs to any family and [`FamilyMembershipError::InvalidInviteCode`]
    /// when the code is malformed or names no family.
    pub async fn join_family(
        &self,
        user: &User,
        invite_code: &str,
    ) -> FamilyMembershipResult<Mutation<Family>> {
        if self.families.find_membership(user.id()).await?.is_some() {
            return Err(FamilyMembershipError::AlreadyInFamily);
        }
        let Ok(code) = InviteCode::parse(invite_code) else {
            warn!(user_id = %user.id(), "join rejected: malformed invite code");
            return Err(FamilyMembershipError::InvalidInviteCode);
        };
        let Some(family) = self.families.find_by_invite_code(&code).await? else {
            warn!(user_id = %user.id(), "join rejected: unknown invite code");
            return Err(FamilyMembershipError::InvalidInviteCode);
        };

        let membership = Membership::begin(user.id(), family.id(), &*self.clock);
        self.families
            .add_member(&membership)
            .await
            .map_err(|err| match err {
                FamilyRepositoryError::AlreadyMember(_) => FamilyMembershipError::AlreadyInFamily,
                other => FamilyMembershipError::Repository(other),
            })?;

        info!(family_id = %family.id(), user_id = %user.id(), "user joined family");
        Ok(Mutation::new(family, MEMBERSHIP_VIEWS))
    }

    /// Returns every member of a family in join order.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::FamilyNotFound`] for an unknown
    /// family.
    pub async fn read_members(&self, family_id: FamilyId) -> FamilyMembershipResult<Vec<User>> {
        if self.families.find_by_id(family_id).await?.is_none() {
            return Err(FamilyMembershipError::FamilyNotFound(family_id));
        }
        let member_ids: Vec<UserId> = self
            .families
            .list_members(family_id)
            .await?
            .iter()
            .map(Membership::user_id)
            .collect();
        debug!(family_id = %family_id, count = member_ids.len(), "read family members");
        Ok(self.users.find_many(&member_ids).await?)
    }

    /// Returns the members of the caller's own family.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::NotInFamily`] when the caller has no
    /// family.
    pub async fn read_family_members(&self, user: &User) -> FamilyMembershipResult<Vec<User>> {
        let membership = self.require_membership(user.id()).await?;
        self.read_members(membership.family_id()).await
    }

    /// Returns the invite code of a family the requester belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::FamilyNotFound`] for an unknown
    /// family and [`FamilyMembershipError::Forbidden`] when the requester
    /// is not one of its members.
    pub async fn read_invite_code(
        &self,
        family_id: FamilyId,
        requester: &User,
    ) -> FamilyMembershipResult<InviteCode> {
        let family = self
            .families
            .find_by_id(family_id)
            .await?
            .ok_or(FamilyMembershipError::FamilyNotFound(family_id))?;
        let is_member = self
            .families
            .find_membership(requester.id())
            .await?
            .is_some_and(|membership| membership.family_id() == family_id);
        if !is_member {
            warn!(family_id = %family_id, user_id = %requester.id(), "invite code request rejected");
            return Err(FamilyMembershipError::Forbidden);
        }
        Ok(family.invite_code().clone())
    }

    /// Returns the caller's family.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::NotInFamily`] when the caller has no
    /// family.
    pub async fn read_family(&self, user: &User) -> FamilyMembershipResult<Family> {
        let membership = self.require_membership(user.id()).await?;
        self.families
            .find_by_id(membership.family_id())
            .await?
            .ok_or(FamilyMembershipError::FamilyNotFound(membership.family_id()))
    }

    /// Returns the role the user holds in their family, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::Repository`] when lookup fails.
    pub async fn role(&self, user: &User) -> FamilyMembershipResult<Option<FamilyRole>> {
        let Some(membership) = self.families.find_membership(user.id()).await? else {
            return Ok(None);
        };
        let family = self
            .families
            .find_by_id(membership.family_id())
            .await?
            .ok_or(FamilyMembershipError::FamilyNotFound(membership.family_id()))?;
        Ok(Some(family.role_of(user.id())))
    }

    /// Returns the user's membership, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyMembershipError::Repository`] when lookup fails.
    pub async fn membership(&self, user_id: UserId) -> FamilyMembershipResult<Option<Membership>> {
        Ok(self.families.find_membership(user_id).await?)
    }

    async fn require_membership(&self, user_id: UserId) -> FamilyMembershipResult<Membership> {
        self.families
            .find_membership(user_id)
            .await?
            .ok_or(FamilyMembershipError::NotInFamily)
    }
}
