//! In-memory repository for families and memberships.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::family::{
    domain::{Family, FamilyId, InviteCode, Membership},
    ports::{FamilyRepository, FamilyRepositoryError, FamilyRepositoryResult},
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory family repository.
///
/// Families and memberships share one lock so that founding a family and
/// binding its founder commit together. Memberships are kept in join order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFamilyRepository {
    state: Arc<RwLock<InMemoryFamilyState>>,
}

#[derive(Debug, Default)]
struct InMemoryFamilyState {
    families: HashMap<FamilyId, Family>,
    invite_index: HashMap<InviteCode, FamilyId>,
    memberships: Vec<Membership>,
}

impl InMemoryFamilyState {
    fn membership_of(&self, user_id: UserId) -> Option<&Membership> {
        self.memberships
            .iter()
            .find(|membership| membership.user_id() == user_id)
    }
}

impl InMemoryFamilyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> FamilyRepositoryError {
    FamilyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FamilyRepository for InMemoryFamilyRepository {
    async fn create_with_founder(
        &self,
        family: &Family,
        founder: &Membership,
    ) -> FamilyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.families.contains_key(&family.id()) {
            return Err(FamilyRepositoryError::DuplicateFamily(family.id()));
        }
        if state.invite_index.contains_key(family.invite_code()) {
            return Err(FamilyRepositoryError::DuplicateInviteCode(
                family.invite_code().clone(),
            ));
        }
        if state.membership_of(founder.user_id()).is_some() {
            return Err(FamilyRepositoryError::AlreadyMember(founder.user_id()));
        }

        state
            .invite_index
            .insert(family.invite_code().clone(), family.id());
        state.families.insert(family.id(), family.clone());
        state.memberships.push(*founder);
        Ok(())
    }

    async fn add_member(&self, membership: &Membership) -> FamilyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.families.contains_key(&membership.family_id()) {
            return Err(FamilyRepositoryError::FamilyNotFound(
                membership.family_id(),
            ));
        }
        if state.membership_of(membership.user_id()).is_some() {
            return Err(FamilyRepositoryError::AlreadyMember(membership.user_id()));
        }
        state.memberships.push(*membership);
        Ok(())
    }

    async fn find_by_id(&self, id: FamilyId) -> FamilyRepositoryResult<Option<Family>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.families.get(&id).cloned())
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> FamilyRepositoryResult<Option<Family>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .invite_index
            .get(code)
            .and_then(|id| state.families.get(id))
            .cloned())
    }

    async fn find_membership(
        &self,
        user_id: UserId,
    ) -> FamilyRepositoryResult<Option<Membership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.membership_of(user_id).copied())
    }

    async fn list_members(&self, family_id: FamilyId) -> FamilyRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .memberships
            .iter()
            .filter(|membership| membership.family_id() == family_id)
            .copied()
            .collect())
    }
}
