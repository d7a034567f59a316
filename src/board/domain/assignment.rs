//! Rules governing who may assign a task to whom.

use super::ListOwner;
use crate::family::domain::{Family, FamilyId};
use crate::identity::domain::UserId;
use thiserror::Error;

/// Snapshot of a family's admin and members, used to check assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRoster {
    family_id: FamilyId,
    admin_id: UserId,
    members: Vec<UserId>,
}

impl FamilyRoster {
    /// Builds a roster from a family and its member identifiers.
    #[must_use]
    pub fn new(family: &Family, members: Vec<UserId>) -> Self {
        Self {
            family_id: family.id(),
            admin_id: family.admin_id(),
            members,
        }
    }

    /// Returns the family this roster describes.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        self.family_id
    }

    /// Returns `true` when `user_id` is the family admin.
    #[must_use]
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_id == user_id
    }

    /// Returns `true` when `user_id` belongs to the family.
    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }
}

/// Reasons an assignment is refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// A non-admin tried to assign a task to someone else.
    #[error("Not enough permissions to assign tasks to others")]
    InsufficientPermissions,

    /// The assignee is outside the list's scope.
    #[error("user {0} cannot be assigned tasks in this list")]
    AssigneeOutOfScope(UserId),
}

/// Checks that `actor` may give a task in a list owned by `owner` to
/// `assignee`.
///
/// Assigning to someone other than yourself requires being the admin of the
/// family that owns the list, so it always fails on personal lists. The
/// assignee must then be the owner of a personal list or a member of the
/// owning family. `roster` must describe the owning family for family
/// lists and is ignored for personal lists.
///
/// # Errors
///
/// Returns [`AssignmentError::InsufficientPermissions`] when the actor may
/// not delegate and [`AssignmentError::AssigneeOutOfScope`] when the
/// assignee is outside the list's scope.
pub fn authorize_assignment(
    owner: ListOwner,
    actor: UserId,
    assignee: UserId,
    roster: Option<&FamilyRoster>,
) -> Result<(), AssignmentError> {
    match owner {
        ListOwner::Personal { owner_id } => {
            if assignee != actor {
                return Err(AssignmentError::InsufficientPermissions);
            }
            if assignee != owner_id {
                return Err(AssignmentError::AssigneeOutOfScope(assignee));
            }
            Ok(())
        }
        ListOwner::Family { family_id } => {
            let Some(family) = roster.filter(|candidate| candidate.family_id() == family_id)
            else {
                return Err(AssignmentError::AssigneeOutOfScope(assignee));
            };
            if assignee != actor && !family.is_admin(actor) {
                return Err(AssignmentError::InsufficientPermissions);
            }
            if !family.contains(assignee) {
                return Err(AssignmentError::AssigneeOutOfScope(assignee));
            }
            Ok(())
        }
    }
}
