//! Diesel row models for list and task persistence.

use super::schema::{lists, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape for list records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List name.
    pub name: String,
    /// Colour as `#RRGGBB`.
    pub color: String,
    /// Owning user for personal lists.
    pub owner_id: Option<uuid::Uuid>,
    /// Owning family for family lists.
    pub family_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for list edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lists)]
pub struct ListChangeset {
    /// New name.
    pub name: String,
    /// New colour.
    pub color: String,
}

/// Row shape for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning list.
    pub list_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial task edits.
///
/// `None` fields are skipped; `Some(None)` notes clear the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskEditChangeset {
    /// New title, if edited.
    pub title: Option<String>,
    /// New notes, if edited.
    pub notes: Option<Option<String>>,
    /// New assignee, if edited.
    pub assignee_id: Option<uuid::Uuid>,
    /// New modification timestamp.
    pub updated_at: DateTime<Utc>,
}
