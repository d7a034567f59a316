//! List creation, visibility, editing, and deletion.

use super::access::{AccessFailure, family_of, visible_list};
use crate::board::{
    domain::{BoardDomainError, ListColor, ListId, ListName, ListOwner, ListSummary, TaskList},
    ports::{BoardRepositoryError, ListRepository},
};
use crate::family::ports::{FamilyRepository, FamilyRepositoryError};
use crate::identity::domain::User;
use crate::views::{Mutation, ViewKey};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    name: String,
    color: String,
    is_family: bool,
}

impl CreateListRequest {
    /// Creates a request for a personal list.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            is_family: false,
        }
    }

    /// Sets whether the list is shared with the creator's family.
    #[must_use]
    pub const fn with_family(mut self, is_family: bool) -> Self {
        self.is_family = is_family;
        self
    }
}

/// Request payload for editing a list; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateListRequest {
    name: Option<String>,
    color: Option<String>,
}

impl UpdateListRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the list.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Recolours the list.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Service-level errors for list operations.
#[derive(Debug, Error)]
pub enum ListRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Board repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// Family lookup failed.
    #[error(transparent)]
    Families(#[from] FamilyRepositoryError),
    /// The user must belong to a family for this operation.
    #[error("User is not part of a family")]
    NotInFamily,
    /// The list does not exist.
    #[error("List not found")]
    NotFound(ListId),
    /// The list exists but the requester may not see it.
    #[error("Not enough permissions")]
    Forbidden(ListId),
}

impl From<AccessFailure> for ListRegistryError {
    fn from(failure: AccessFailure) -> Self {
        match failure {
            AccessFailure::Missing(id) => Self::NotFound(id),
            AccessFailure::Forbidden(id) => Self::Forbidden(id),
            AccessFailure::Lists(err) => Self::Repository(err),
            AccessFailure::Families(err) => Self::Families(err),
        }
    }
}

/// Result type for list operations.
pub type ListRegistryResult<T> = Result<T, ListRegistryError>;

/// Personal and family list registry.
#[derive(Clone)]
pub struct ListRegistryService<L, F, C>
where
    L: ListRepository,
    F: FamilyRepository,
    C: Clock + Send + Sync,
{
    lists: Arc<L>,
    families: Arc<F>,
    clock: Arc<C>,
}

impl<L, F, C> ListRegistryService<L, F, C>
where
    L: ListRepository,
    F: FamilyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new list registry.
    #[must_use]
    pub const fn new(lists: Arc<L>, families: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            lists,
            families,
            clock,
        }
    }

    /// Creates a personal list, or a family list when requested.
    ///
    /// # Errors
    ///
    /// Returns [`ListRegistryError::NotInFamily`] for a family list when the
    /// owner has no family and [`ListRegistryError::Domain`] for an invalid
    /// name or colour.
    pub async fn create_list(
        &self,
        owner: &User,
        request: CreateListRequest,
    ) -> ListRegistryResult<Mutation<ListSummary>> {
        let CreateListRequest {
            name,
            color,
            is_family,
        } = request;
        let list_name = ListName::new(name)?;
        let list_color = ListColor::parse(color)?;

        let list_owner = if is_family {
            let family_id = family_of(&*self.families, owner.id())
                .await?
                .ok_or(ListRegistryError::NotInFamily)?;
            ListOwner::Family { family_id }
        } else {
            ListOwner::Personal {
                owner_id: owner.id(),
            }
        };

        let list = TaskList::create(list_name, list_color, list_owner, &*self.clock);
        self.lists.store_list(&list).await?;
        info!(list_id = %list.id(), user_id = %owner.id(), kind = ?list_owner.kind(), "list created");

        let collection = ViewKey::list_collection(list_owner.kind());
        Ok(Mutation::new(
            ListSummary {
                list,
                task_count: 0,
            },
            [collection],
        ))
    }

    /// Returns the user's personal lists with their open-task counts.
    ///
    /// # Errors
    ///
    /// Returns [`ListRegistryError::Repository`] when lookup fails.
    pub async fn read_personal_lists(&self, user: &User) -> ListRegistryResult<Vec<ListSummary>> {
        let owner = ListOwner::Personal {
            owner_id: user.id(),
        };
        self.summaries(owner).await
    }

    /// Returns the lists of the user's family with their open-task counts.
    ///
    /// # Errors
    ///
    /// Returns [`ListRegistryError::NotInFamily`] when the user has no
    /// family.
    pub async fn read_family_lists(&self, user: &User) -> ListRegistryResult<Vec<ListSummary>> {
        let family_id = family_of(&*self.families, user.id())
            .await?
            .ok_or(ListRegistryError::NotInFamily)?;
        self.summaries(ListOwner::Family { family_id }).await
    }

    /// Returns one list visible to the requester.
    ///
    /// # Errors
    ///
    /// Returns [`ListRegistryError::NotFound`] when the list does not exist
    /// and [`ListRegistryError::Forbidden`] when the requester may not see
    /// it.
    pub async fn read_list(&self, list_id: ListId, requester: &User) -> ListRegistryResult<ListSummary> {
        let list = visible_list(&*self.lists, &*self.families, list_id, requester.id()).await?;
        debug!(list_id = %list_id, "read list");
        self.summarize(list).await
    }

    /// Edits a list's name or colour.
    ///
    /// Any user who can see the list may edit it.
    ///
    /// # Errors
    ///
    /// Returns the same access errors as [`Self::read_list`] and
    /// [`ListRegistryError::Domain`] for invalid values.
    pub async fn update_list(
        &self,
        list_id: ListId,
        requester: &User,
        request: UpdateListRequest,
    ) -> ListRegistryResult<Mutation<ListSummary>> {
        let new_name = request.name.map(ListName::new).transpose()?;
        let new_color = request.color.map(ListColor::parse).transpose()?;
        let mut list = visible_list(&*self.lists, &*self.families, list_id, requester.id()).await?;

        if let Some(name) = new_name {
            list.rename(name);
        }
        if let Some(color) = new_color {
            list.recolor(color);
        }
        self.lists.update_list(&list).await.map_err(|err| match err {
            BoardRepositoryError::ListNotFound(id) => ListRegistryError::NotFound(id),
            other => ListRegistryError::Repository(other),
        })?;
        info!(list_id = %list_id, user_id = %requester.id(), "list updated");

        let collection = ViewKey::list_collection(list.owner().kind());
        let summary = self.summarize(list).await?;
        Ok(Mutation::new(summary, [collection, ViewKey::List(list_id)]))
    }

    /// Deletes a list together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns the same access errors as [`Self::read_list`].
    pub async fn delete_list(&self, list_id: ListId, requester: &User) -> ListRegistryResult<Mutation<()>> {
        let list = visible_list(&*self.lists, &*self.families, list_id, requester.id()).await?;
        let removed_tasks = self.lists.delete_list(list_id).await.map_err(|err| match err {
            BoardRepositoryError::ListNotFound(id) => ListRegistryError::NotFound(id),
            other => ListRegistryError::Repository(other),
        })?;
        info!(list_id = %list_id, user_id = %requester.id(), removed_tasks, "list deleted");

        let collection = ViewKey::list_collection(list.owner().kind());
        Ok(Mutation::new((), [collection, ViewKey::List(list_id)]))
    }

    /// Counts the open tasks in a list.
    ///
    /// The count is recomputed from storage on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ListRegistryError::Repository`] when counting fails.
    pub async fn task_count(&self, list_id: ListId) -> ListRegistryResult<usize> {
        Ok(self.lists.count_open_tasks(list_id).await?)
    }

    async fn summaries(&self, owner: ListOwner) -> ListRegistryResult<Vec<ListSummary>> {
        let lists = self.lists.lists_owned_by(owner).await?;
        debug!(kind = ?owner.kind(), count = lists.len(), "read list collection");
        let mut summaries = Vec::with_capacity(lists.len());
        for list in lists {
            summaries.push(self.summarize(list).await?);
        }
        Ok(summaries)
    }

    async fn summarize(&self, list: TaskList) -> ListRegistryResult<ListSummary> {
        let task_count = self.lists.count_open_tasks(list.id()).await?;
        Ok(ListSummary { list, task_count })
    }
}
