//! Task aggregate and completion state.

use super::{ListId, TaskId, TaskNotes, TaskTitle};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion state of a task.
///
/// Transitions toggle freely in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet done.
    Open,
    /// Marked done; eligible for clear-completed.
    Completed,
}

impl TaskStatus {
    /// Maps a completion flag to a status.
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed { Self::Completed } else { Self::Open }
    }

    /// Returns `true` for [`TaskStatus::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    list_id: ListId,
    title: TaskTitle,
    notes: Option<TaskNotes>,
    status: TaskStatus,
    assignee_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning list.
    pub list_id: ListId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted notes.
    pub notes: Option<TaskNotes>,
    /// Persisted completion state.
    pub status: TaskStatus,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open task in a list.
    ///
    /// Assignment is not checked here; callers authorize it first with
    /// [`super::authorize_assignment`].
    #[must_use]
    pub fn create(
        list_id: ListId,
        title: TaskTitle,
        notes: Option<TaskNotes>,
        assignee_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            list_id,
            title,
            notes,
            status: TaskStatus::Open,
            assignee_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            list_id: data.list_id,
            title: data.title,
            notes: data.notes,
            status: data.status,
            assignee_id: data.assignee_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the notes, if any.
    #[must_use]
    pub const fn notes(&self) -> Option<&TaskNotes> {
        self.notes.as_ref()
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the fields set in `edit`, leaving the others untouched.
    pub fn apply(&mut self, edit: &TaskEdit) {
        if let Some(title) = &edit.title {
            self.title = title.clone();
        }
        if let Some(notes) = &edit.notes {
            self.notes = notes.clone();
        }
        if let Some(assignee_id) = edit.assignee_id {
            self.assignee_id = assignee_id;
        }
        self.updated_at = edit.updated_at;
    }

    /// Sets the completion state as of `at`.
    pub const fn set_status(&mut self, status: TaskStatus, at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = at;
    }
}

/// A partial edit of a task's title, notes, or assignee.
///
/// Stores write only the fields that are set, so a concurrent change to
/// any other field (completion included) survives the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    title: Option<TaskTitle>,
    notes: Option<Option<TaskNotes>>,
    assignee_id: Option<UserId>,
    updated_at: DateTime<Utc>,
}

impl TaskEdit {
    /// Starts an empty edit stamped with the current time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            title: None,
            notes: None,
            assignee_id: None,
            updated_at: clock.utc(),
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the notes; `None` clears them.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<TaskNotes>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Hands the task to another user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Returns the new title, if set.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the new notes, if set; the inner `None` clears them.
    #[must_use]
    pub fn notes(&self) -> Option<Option<&TaskNotes>> {
        self.notes.as_ref().map(Option::as_ref)
    }

    /// Returns the new assignee, if set.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the modification timestamp the edit carries.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
