//! Diesel row models for family persistence.

use super::schema::{families, family_members};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape for family records, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = families)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FamilyRow {
    /// Family identifier.
    pub id: uuid::Uuid,
    /// Family display name.
    pub name: String,
    /// Founding admin.
    pub admin_id: uuid::Uuid,
    /// Invite code.
    pub invite_code: String,
    /// Founding timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shape for membership records.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = family_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    /// Member identifier.
    pub user_id: uuid::Uuid,
    /// Family identifier.
    pub family_id: uuid::Uuid,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}
