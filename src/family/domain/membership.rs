//! Membership of a user in a family.

use super::FamilyId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Binding of a user to the single family they belong to.
///
/// Memberships are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    user_id: UserId,
    family_id: FamilyId,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Starts a membership at the current clock time.
    #[must_use]
    pub fn begin(user_id: UserId, family_id: FamilyId, clock: &impl Clock) -> Self {
        Self {
            user_id,
            family_id,
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        user_id: UserId,
        family_id: FamilyId,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            family_id,
            joined_at,
        }
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the family.
    #[must_use]
    pub const fn family_id(&self) -> FamilyId {
        self.family_id
    }

    /// Returns when the user joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
