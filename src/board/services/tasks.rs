//! Task lifecycle and the assignment rule.

use super::access::{AccessFailure, roster_of, visible_list};
use crate::board::{
    domain::{
        AssignmentError, BoardDomainError, FamilyRoster, ListId, Task, TaskEdit, TaskId,
        TaskList, TaskNotes, TaskStatus, TaskTitle, authorize_assignment,
    },
    ports::{BoardRepositoryError, ListRepository, TaskRepository},
};
use crate::family::ports::{FamilyRepository, FamilyRepositoryError};
use crate::identity::domain::{User, UserId};
use crate::views::{Mutation, ViewKey};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    list_id: ListId,
    title: String,
    notes: Option<String>,
    assignee_id: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request for an unassigned task; the creator becomes the
    /// assignee unless [`Self::with_assignee`] is used.
    #[must_use]
    pub fn new(list_id: ListId, title: impl Into<String>) -> Self {
        Self {
            list_id,
            title: title.into(),
            notes: None,
            assignee_id: None,
        }
    }

    /// Attaches notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Assigns the task to a specific user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Request payload for editing a task; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    notes: Option<String>,
    assignee_id: Option<UserId>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the notes; blank notes clear them.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskEngineError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Board repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// Family lookup failed.
    #[error(transparent)]
    Families(#[from] FamilyRepositoryError),
    /// A non-admin tried to assign a task to someone else.
    #[error("Not enough permissions to assign tasks to others")]
    InsufficientPermissions,
    /// The assignee is outside the list's scope.
    #[error("User cannot be assigned tasks in this list")]
    AssigneeOutOfScope(UserId),
    /// The list does not exist.
    #[error("List not found")]
    ListNotFound(ListId),
    /// The task does not exist.
    #[error("Task not found")]
    TaskNotFound(TaskId),
    /// The requester may not see the list.
    #[error("Not enough permissions")]
    Forbidden(ListId),
}

impl From<AccessFailure> for TaskEngineError {
    fn from(failure: AccessFailure) -> Self {
        match failure {
            AccessFailure::Missing(id) => Self::ListNotFound(id),
            AccessFailure::Forbidden(id) => Self::Forbidden(id),
            AccessFailure::Lists(err) => Self::Repository(err),
            AccessFailure::Families(err) => Self::Families(err),
        }
    }
}

impl From<AssignmentError> for TaskEngineError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::InsufficientPermissions => Self::InsufficientPermissions,
            AssignmentError::AssigneeOutOfScope(user_id) => Self::AssigneeOutOfScope(user_id),
        }
    }
}

/// Result type for task operations.
pub type TaskEngineResult<T> = Result<T, TaskEngineError>;

/// Task lifecycle service.
#[derive(Clone)]
pub struct TaskEngineService<B, F, C>
where
    B: ListRepository + TaskRepository,
    F: FamilyRepository,
    C: Clock + Send + Sync,
{
    board: Arc<B>,
    families: Arc<F>,
    clock: Arc<C>,
}

impl<B, F, C> TaskEngineService<B, F, C>
where
    B: ListRepository + TaskRepository,
    F: FamilyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task engine.
    #[must_use]
    pub const fn new(board: Arc<B>, families: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            board,
            families,
            clock,
        }
    }

    /// Creates an open task in a list the creator can see.
    ///
    /// Without an explicit assignee the creator is assigned. Assigning
    /// anyone else requires being the admin of the family owning the list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::InsufficientPermissions`] when a non-admin
    /// assigns someone else, [`TaskEngineError::AssigneeOutOfScope`] when
    /// the assignee is outside the list, list access errors, and
    /// [`TaskEngineError::Domain`] for an invalid title.
    pub async fn create_task(
        &self,
        creator: &User,
        request: CreateTaskRequest,
    ) -> TaskEngineResult<Mutation<Task>> {
        let CreateTaskRequest {
            list_id,
            title,
            notes,
            assignee_id,
        } = request;
        let task_title = TaskTitle::new(title)?;
        let task_notes = notes.and_then(TaskNotes::parse);
        let list = self.visible_list(list_id, creator.id()).await?;

        let assignee = assignee_id.unwrap_or_else(|| creator.id());
        self.authorize(&list, creator.id(), assignee).await?;

        let task = Task::create(list_id, task_title, task_notes, assignee, &*self.clock);
        self.board.store_task(&task).await.map_err(|err| match err {
            BoardRepositoryError::ListNotFound(id) => TaskEngineError::ListNotFound(id),
            other => TaskEngineError::Repository(other),
        })?;
        info!(task_id = %task.id(), list_id = %list_id, assignee_id = %assignee, "task created");
        Ok(Mutation::new(task, task_views(list_id)))
    }

    /// Edits a task's title, notes, or assignee.
    ///
    /// The assignment rule applies only when the assignee actually changes,
    /// and only the supplied fields are written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::TaskNotFound`] for an unknown task, list
    /// access errors, and the assignment errors of [`Self::create_task`].
    pub async fn update_task(
        &self,
        editor: &User,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskEngineResult<Mutation<Task>> {
        let UpdateTaskRequest {
            title,
            notes,
            assignee_id,
        } = request;
        let new_title = title.map(TaskTitle::new).transpose()?;
        let (current, list) = self.visible_task(task_id, editor.id()).await?;

        let mut edit = TaskEdit::new(&*self.clock);
        if let Some(assignee) = assignee_id.filter(|candidate| *candidate != current.assignee_id()) {
            self.authorize(&list, editor.id(), assignee).await?;
            edit = edit.with_assignee(assignee);
        }
        if let Some(retitled) = new_title {
            edit = edit.with_title(retitled);
        }
        if let Some(raw_notes) = notes {
            edit = edit.with_notes(TaskNotes::parse(raw_notes));
        }

        let task = self
            .board
            .edit_task(task_id, &edit)
            .await
            .map_err(task_write_error)?;
        info!(task_id = %task_id, user_id = %editor.id(), "task updated");
        Ok(Mutation::new(task, task_views(list.id())))
    }

    /// Marks a task completed or reopens it.
    ///
    /// Any user who can see the list may toggle completion. Only the
    /// completion state is written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::TaskNotFound`] for an unknown task and
    /// list access errors.
    pub async fn update_task_status(
        &self,
        editor: &User,
        task_id: TaskId,
        completed: bool,
    ) -> TaskEngineResult<Mutation<Task>> {
        let (_, list) = self.visible_task(task_id, editor.id()).await?;
        let task = self
            .board
            .set_task_status(task_id, TaskStatus::from_completed(completed), self.clock.utc())
            .await
            .map_err(task_write_error)?;
        info!(task_id = %task_id, user_id = %editor.id(), completed, "task status changed");
        Ok(Mutation::new(task, task_views(list.id())))
    }

    /// Deletes one task, open or completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::TaskNotFound`] for an unknown task and
    /// list access errors.
    pub async fn delete_task(&self, editor: &User, task_id: TaskId) -> TaskEngineResult<Mutation<()>> {
        let (_, list) = self.visible_task(task_id, editor.id()).await?;
        self.board
            .delete_task(task_id)
            .await
            .map_err(task_write_error)?;
        info!(task_id = %task_id, user_id = %editor.id(), "task deleted");
        Ok(Mutation::new((), task_views(list.id())))
    }

    /// Deletes every task in the list that is completed at call time.
    ///
    /// Open tasks are untouched; with nothing completed this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns list access errors.
    pub async fn clear_completed_tasks(
        &self,
        editor: &User,
        list_id: ListId,
    ) -> TaskEngineResult<Mutation<Vec<TaskId>>> {
        self.visible_list(list_id, editor.id()).await?;
        let removed = self.board.delete_completed(list_id).await?;
        info!(list_id = %list_id, user_id = %editor.id(), removed = removed.len(), "cleared completed tasks");
        Ok(Mutation::new(removed, task_views(list_id)))
    }

    /// Returns the tasks of a list in creation order.
    ///
    /// # Errors
    ///
    /// Returns list access errors.
    pub async fn read_tasks(&self, list_id: ListId, requester: &User) -> TaskEngineResult<Vec<Task>> {
        self.visible_list(list_id, requester.id()).await?;
        let tasks = self.board.tasks_in_list(list_id).await?;
        debug!(list_id = %list_id, count = tasks.len(), "read tasks");
        Ok(tasks)
    }

    async fn visible_list(&self, list_id: ListId, requester: UserId) -> TaskEngineResult<TaskList> {
        Ok(visible_list(&*self.board, &*self.families, list_id, requester).await?)
    }

    async fn visible_task(
        &self,
        task_id: TaskId,
        requester: UserId,
    ) -> TaskEngineResult<(Task, TaskList)> {
        let task = self
            .board
            .find_task(task_id)
            .await?
            .ok_or(TaskEngineError::TaskNotFound(task_id))?;
        let list = self.visible_list(task.list_id(), requester).await?;
        Ok((task, list))
    }

    async fn authorize(&self, list: &TaskList, actor: UserId, assignee: UserId) -> TaskEngineResult<()> {
        let roster: Option<FamilyRoster> = match list.owner().family_id() {
            Some(family_id) => roster_of(&*self.families, family_id).await?,
            None => None,
        };
        authorize_assignment(list.owner(), actor, assignee, roster.as_ref()).map_err(|err| {
            warn!(list_id = %list.id(), actor_id = %actor, assignee_id = %assignee, error = %err, "assignment rejected");
            TaskEngineError::from(err)
        })
    }
}

fn task_write_error(err: BoardRepositoryError) -> TaskEngineError {
    match err {
        BoardRepositoryError::TaskNotFound(id) => TaskEngineError::TaskNotFound(id),
        other => TaskEngineError::Repository(other),
    }
}

const fn task_views(list_id: ListId) -> [ViewKey; 2] {
    [ViewKey::Tasks(list_id), ViewKey::TaskCount(list_id)]
}
