//! Request and response bodies.

use crate::board::domain::{ListId, ListOwner, ListSummary, Task, TaskId};
use crate::family::domain::{Family, FamilyId, FamilyRole, InviteCode};
use crate::identity::domain::{AccessToken, User, UserId};
use crate::views::ListKind;
use serde::{Deserialize, Serialize};

/// Body of a registration request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterBody {
    /// Email address.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Plain-text password.
    pub password: String,
}

/// Body of a login request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginBody {
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Body of a family creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateFamilyBody {
    /// Family name.
    pub name: String,
}

/// Body of a family join request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinFamilyBody {
    /// Invite code shared by a member.
    pub invite_code: String,
}

/// Body of a list creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateListBody {
    /// List name.
    pub name: String,
    /// Colour as `#RRGGBB`.
    pub color: String,
    /// Share the list with the caller's family.
    #[serde(default)]
    pub is_family_list: bool,
}

/// Body of a list edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateListBody {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New colour.
    #[serde(default)]
    pub color: Option<String>,
}

/// Body of a task creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskBody {
    /// Owning list.
    pub list_id: ListId,
    /// Title.
    pub title: String,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Assignee; defaults to the caller.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Body of a task edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New notes; blank clears them.
    #[serde(default)]
    pub notes: Option<String>,
    /// New assignee.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Body of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaskStatusBody {
    /// Desired completion state.
    pub completed: bool,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPublic {
    /// User identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Family the user belongs to.
    pub family_id: Option<FamilyId>,
    /// Whether the user administers their family.
    pub is_admin: bool,
}

impl UserPublic {
    pub(super) fn new(user: &User, family_id: Option<FamilyId>, role: Option<FamilyRole>) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            name: user.name().map(|name| name.as_str().to_owned()),
            family_id,
            is_admin: role.is_some_and(FamilyRole::is_admin),
        }
    }
}

/// Bearer token issued by login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TokenPublic {
    /// The token to present on later requests.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: &'static str,
}

impl TokenPublic {
    pub(super) fn new(token: &AccessToken) -> Self {
        Self {
            access_token: token.as_str().to_owned(),
            token_type: "bearer",
        }
    }
}

impl std::fmt::Debug for TokenPublic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPublic")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Result of registration: the new user and their first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupPublic {
    /// The registered user.
    pub user: UserPublic,
    /// Token for the new session.
    pub token: TokenPublic,
}

/// Public view of a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyPublic {
    /// Family identifier.
    pub id: FamilyId,
    /// Family name.
    pub name: String,
    /// Founding admin.
    pub admin_id: UserId,
}

impl From<&Family> for FamilyPublic {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id(),
            name: family.name().as_str().to_owned(),
            admin_id: family.admin_id(),
        }
    }
}

/// A family's invite code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteCodePublic {
    /// The code.
    pub code: String,
}

impl From<InviteCode> for InviteCodePublic {
    fn from(code: InviteCode) -> Self {
        Self {
            code: code.as_str().to_owned(),
        }
    }
}

/// Public view of a list with its open-task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPublic {
    /// List identifier.
    pub id: ListId,
    /// List name.
    pub name: String,
    /// Colour as `#RRGGBB`.
    pub color: String,
    /// Personal or family list.
    pub kind: ListKind,
    /// Owner of a personal list.
    pub owner_id: Option<UserId>,
    /// Family of a family list.
    pub family_id: Option<FamilyId>,
    /// Tasks not yet completed.
    pub task_count: usize,
}

impl From<&ListSummary> for ListPublic {
    fn from(summary: &ListSummary) -> Self {
        let list = &summary.list;
        let (owner_id, family_id) = match list.owner() {
            ListOwner::Personal { owner_id } => (Some(owner_id), None),
            ListOwner::Family { family_id } => (None, Some(family_id)),
        };
        Self {
            id: list.id(),
            name: list.name().as_str().to_owned(),
            color: list.color().as_str().to_owned(),
            kind: list.owner().kind(),
            owner_id,
            family_id,
            task_count: summary.task_count,
        }
    }
}

/// Public view of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPublic {
    /// Task identifier.
    pub id: TaskId,
    /// Owning list.
    pub list_id: ListId,
    /// Title.
    pub title: String,
    /// Notes.
    pub notes: Option<String>,
    /// Completion state.
    pub completed: bool,
    /// Assignee.
    pub user_id: UserId,
}

impl From<&Task> for TaskPublic {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            list_id: task.list_id(),
            title: task.title().as_str().to_owned(),
            notes: task.notes().map(|notes| notes.as_str().to_owned()),
            completed: task.is_completed(),
            user_id: task.assignee_id(),
        }
    }
}
