//! Visibility checks shared by the list and task services.

use crate::board::{
    domain::{FamilyRoster, ListId, TaskList},
    ports::{BoardRepositoryError, ListRepository},
};
use crate::family::{
    domain::FamilyId,
    ports::{FamilyRepository, FamilyRepositoryError},
};
use crate::identity::domain::UserId;
use tracing::warn;

/// Why a list could not be resolved for a requester.
#[derive(Debug)]
pub(super) enum AccessFailure {
    Missing(ListId),
    Forbidden(ListId),
    Lists(BoardRepositoryError),
    Families(FamilyRepositoryError),
}

impl From<BoardRepositoryError> for AccessFailure {
    fn from(err: BoardRepositoryError) -> Self {
        Self::Lists(err)
    }
}

impl From<FamilyRepositoryError> for AccessFailure {
    fn from(err: FamilyRepositoryError) -> Self {
        Self::Families(err)
    }
}

/// Returns the family the user belongs to, if any.
pub(super) async fn family_of<F: FamilyRepository + ?Sized>(
    families: &F,
    user_id: UserId,
) -> Result<Option<FamilyId>, FamilyRepositoryError> {
    Ok(families
        .find_membership(user_id)
        .await?
        .map(|membership| membership.family_id()))
}

/// Loads a list and checks that `requester` may see it.
///
/// Viewing and editing share one rule: the owner of a personal list, or any
/// member of the owning family.
pub(super) async fn visible_list<L, F>(
    lists: &L,
    families: &F,
    list_id: ListId,
    requester: UserId,
) -> Result<TaskList, AccessFailure>
where
    L: ListRepository + ?Sized,
    F: FamilyRepository + ?Sized,
{
    let list = lists
        .find_list(list_id)
        .await?
        .ok_or(AccessFailure::Missing(list_id))?;
    let requester_family = family_of(families, requester).await?;
    if !list.owner().is_visible_to(requester, requester_family) {
        warn!(list_id = %list_id, user_id = %requester, "list access rejected");
        return Err(AccessFailure::Forbidden(list_id));
    }
    Ok(list)
}

/// Loads the roster of a family for assignment checks.
pub(super) async fn roster_of<F: FamilyRepository + ?Sized>(
    families: &F,
    family_id: FamilyId,
) -> Result<Option<FamilyRoster>, FamilyRepositoryError> {
    let Some(family) = families.find_by_id(family_id).await? else {
        return Ok(None);
    };
    let members = families
        .list_members(family_id)
        .await?
        .iter()
        .map(|membership| membership.user_id())
        .collect();
    Ok(Some(FamilyRoster::new(&family, members)))
}
