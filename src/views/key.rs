//! Identifiers for cacheable read-views.

use crate::{board::domain::ListId, identity::domain::UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection view a list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Lists owned by a single user.
    Personal,
    /// Lists shared by every member of a family.
    Family,
}

/// A read-view that can become stale after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum ViewKey {
    /// The authenticated user's own profile.
    CurrentUser,
    /// A single user's public profile.
    User(UserId),
    /// The member roster of the caller's family.
    FamilyMembers,
    /// The caller's personal list collection.
    PersonalLists,
    /// The caller's family list collection.
    FamilyLists,
    /// A single list.
    List(ListId),
    /// The tasks of a single list.
    Tasks(ListId),
    /// The open-task count shown in a list summary.
    TaskCount(ListId),
}

impl ViewKey {
    /// Returns the collection view for lists of the given kind.
    #[must_use]
    pub const fn list_collection(kind: ListKind) -> Self {
        match kind {
            ListKind::Personal => Self::PersonalLists,
            ListKind::Family => Self::FamilyLists,
        }
    }

    /// Renders the client-side cache key for this view.
    #[must_use]
    pub fn query_key(&self) -> Vec<String> {
        match self {
            Self::CurrentUser => vec!["currentUser".to_owned()],
            Self::User(id) => vec!["user".to_owned(), id.to_string()],
            Self::FamilyMembers => vec!["members".to_owned()],
            Self::PersonalLists => vec!["personal-lists".to_owned()],
            Self::FamilyLists => vec!["family-lists".to_owned()],
            Self::List(id) => vec!["list".to_owned(), id.to_string()],
            Self::Tasks(id) => vec!["tasks".to_owned(), id.to_string()],
            Self::TaskCount(id) => vec!["task-count".to_owned(), id.to_string()],
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_key().join("/"))
    }
}
