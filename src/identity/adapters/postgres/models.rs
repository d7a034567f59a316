//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Normalized email.
    pub email: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Encoded password hash.
    pub hashed_password: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Normalized email.
    pub email: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Encoded password hash.
    pub hashed_password: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
