//! List aggregate and its ownership.

use super::{ListColor, ListId, ListName};
use crate::family::domain::FamilyId;
use crate::identity::domain::UserId;
use crate::views::ListKind;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Who a list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListOwner {
    /// Visible only to its single owner.
    Personal {
        /// The owning user.
        owner_id: UserId,
    },
    /// Shared by every member of a family.
    Family {
        /// The owning family.
        family_id: FamilyId,
    },
}

impl ListOwner {
    /// Returns the collection kind this owner places a list in.
    #[must_use]
    pub const fn kind(self) -> ListKind {
        match self {
            Self::Personal { .. } => ListKind::Personal,
            Self::Family { .. } => ListKind::Family,
        }
    }

    /// Returns the owning family for family lists.
    #[must_use]
    pub const fn family_id(self) -> Option<FamilyId> {
        match self {
            Self::Personal { .. } => None,
            Self::Family { family_id } => Some(family_id),
        }
    }

    /// Returns `true` when a user with the given family may see the list.
    #[must_use]
    pub fn is_visible_to(self, user_id: UserId, user_family: Option<FamilyId>) -> bool {
        match self {
            Self::Personal { owner_id } => owner_id == user_id,
            Self::Family { family_id } => user_family == Some(family_id),
        }
    }
}

/// List aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    id: ListId,
    name: ListName,
    color: ListColor,
    owner: ListOwner,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted name.
    pub name: ListName,
    /// Persisted colour.
    pub color: ListColor,
    /// Persisted owner.
    pub owner: ListOwner,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskList {
    /// Creates a new list.
    #[must_use]
    pub fn create(name: ListName, color: ListColor, owner: ListOwner, clock: &impl Clock) -> Self {
        Self {
            id: ListId::new(),
            name,
            color,
            owner,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            color: data.color,
            owner: data.owner,
            created_at: data.created_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list name.
    #[must_use]
    pub const fn name(&self) -> &ListName {
        &self.name
    }

    /// Returns the list colour.
    #[must_use]
    pub const fn color(&self) -> &ListColor {
        &self.color
    }

    /// Returns the list owner.
    #[must_use]
    pub const fn owner(&self) -> ListOwner {
        self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the list.
    pub fn rename(&mut self, name: ListName) {
        self.name = name;
    }

    /// Recolours the list.
    pub fn recolor(&mut self, color: ListColor) {
        self.color = color;
    }
}

/// A list together with its number of open tasks.
///
/// The count is computed at read time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// The list.
    pub list: TaskList,
    /// Tasks in the list that are not completed.
    pub task_count: usize,
}
