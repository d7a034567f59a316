//! Repository ports for lists and tasks.
//!
//! Lists and tasks are usually served by one store so that deleting a list
//! and its tasks, or clearing completed tasks, commits as a unit.

use crate::board::domain::{ListId, ListOwner, Task, TaskEdit, TaskId, TaskList, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// List persistence contract.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateList`] when the ID exists.
    async fn store_list(&self, list: &TaskList) -> BoardRepositoryResult<()>;

    /// Replaces an existing list's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ListNotFound`] when the list is gone.
    async fn update_list(&self, list: &TaskList) -> BoardRepositoryResult<()>;

    /// Deletes a list and every task in it as one atomic step.
    ///
    /// Returns the number of tasks removed with the list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ListNotFound`] when the list is gone.
    async fn delete_list(&self, id: ListId) -> BoardRepositoryResult<usize>;

    /// Finds a list by identifier.
    async fn find_list(&self, id: ListId) -> BoardRepositoryResult<Option<TaskList>>;

    /// Returns the lists of an owner in creation order.
    async fn lists_owned_by(&self, owner: ListOwner) -> BoardRepositoryResult<Vec<TaskList>>;

    /// Counts the tasks in a list that are not completed.
    async fn count_open_tasks(&self, id: ListId) -> BoardRepositoryResult<usize>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ListNotFound`] when the owning list
    /// no longer exists or [`BoardRepositoryError::DuplicateTask`] when the
    /// ID exists.
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Writes only the fields set in `edit` and returns the stored task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task is gone.
    async fn edit_task(&self, id: TaskId, edit: &TaskEdit) -> BoardRepositoryResult<Task>;

    /// Writes only the completion state and modification time and returns
    /// the stored task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task is gone.
    async fn set_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task>;

    /// Deletes one task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task is gone.
    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Returns the tasks of a list in creation order.
    async fn tasks_in_list(&self, list_id: ListId) -> BoardRepositoryResult<Vec<Task>>;

    /// Deletes the tasks of a list that are completed at the moment of
    /// deletion and returns their identifiers.
    ///
    /// The completion filter is evaluated atomically with the delete, never
    /// against a previously read snapshot.
    async fn delete_completed(&self, list_id: ListId) -> BoardRepositoryResult<Vec<TaskId>>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
