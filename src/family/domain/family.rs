//! Family aggregate root and derived member roles.

use super::{FamilyId, FamilyName, InviteCode};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role of a family member, derived from the family's admin reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRole {
    /// The founding user; the only member who may assign tasks to others.
    Admin,
    /// Any member who joined through the invite code.
    Member,
}

impl FamilyRole {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns `true` for the admin role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Family aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    id: FamilyId,
    name: FamilyName,
    admin_id: UserId,
    invite_code: InviteCode,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFamilyData {
    /// Persisted family identifier.
    pub id: FamilyId,
    /// Persisted family name.
    pub name: FamilyName,
    /// Persisted founding admin.
    pub admin_id: UserId,
    /// Persisted invite code.
    pub invite_code: InviteCode,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Family {
    /// Founds a family with `admin_id` as its permanent admin.
    #[must_use]
    pub fn found(
        name: FamilyName,
        admin_id: UserId,
        invite_code: InviteCode,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: FamilyId::new(),
            name,
            admin_id,
            invite_code,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a family from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFamilyData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            admin_id: data.admin_id,
            invite_code: data.invite_code,
            created_at: data.created_at,
        }
    }

    /// Returns the family identifier.
    #[must_use]
    pub const fn id(&self) -> FamilyId {
        self.id
    }

    /// Returns the family name.
    #[must_use]
    pub const fn name(&self) -> &FamilyName {
        &self.name
    }

    /// Returns the founding admin.
    #[must_use]
    pub const fn admin_id(&self) -> UserId {
        self.admin_id
    }

    /// Returns the invite code.
    #[must_use]
    pub const fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the role `user_id` holds, assuming they are a member.
    #[must_use]
    pub fn role_of(&self, user_id: UserId) -> FamilyRole {
        if user_id == self.admin_id {
            FamilyRole::Admin
        } else {
            FamilyRole::Member
        }
    }
}
