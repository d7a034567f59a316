//! In-memory store serving both list and task repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{ListId, ListOwner, Task, TaskEdit, TaskId, TaskList, TaskStatus},
    ports::{BoardRepositoryError, BoardRepositoryResult, ListRepository, TaskRepository},
};

/// Thread-safe in-memory board store.
///
/// Lists and tasks live under one lock and in insertion order, so cascade
/// deletes and clear-completed are atomic and reads come back in creation
/// order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    lists: Vec<TaskList>,
    tasks: Vec<Task>,
}

impl InMemoryBoardState {
    fn list_mut(&mut self, id: ListId) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|list| list.id() == id)
    }

    fn has_list(&self, id: ListId) -> bool {
        self.lists.iter().any(|list| list.id() == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ListRepository for InMemoryBoardStore {
    async fn store_list(&self, list: &TaskList) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.has_list(list.id()) {
            return Err(BoardRepositoryError::DuplicateList(list.id()));
        }
        state.lists.push(list.clone());
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .list_mut(list.id())
            .ok_or(BoardRepositoryError::ListNotFound(list.id()))?;
        *stored = list.clone();
        Ok(())
    }

    async fn delete_list(&self, id: ListId) -> BoardRepositoryResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.has_list(id) {
            return Err(BoardRepositoryError::ListNotFound(id));
        }
        state.lists.retain(|list| list.id() != id);
        let before = state.tasks.len();
        state.tasks.retain(|task| task.list_id() != id);
        Ok(before - state.tasks.len())
    }

    async fn find_list(&self, id: ListId) -> BoardRepositoryResult<Option<TaskList>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.lists.iter().find(|list| list.id() == id).cloned())
    }

    async fn lists_owned_by(&self, owner: ListOwner) -> BoardRepositoryResult<Vec<TaskList>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .lists
            .iter()
            .filter(|list| list.owner() == owner)
            .cloned()
            .collect())
    }

    async fn count_open_tasks(&self, id: ListId) -> BoardRepositoryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.list_id() == id && !task.is_completed())
            .count())
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.has_list(task.list_id()) {
            return Err(BoardRepositoryError::ListNotFound(task.list_id()));
        }
        if state.tasks.iter().any(|stored| stored.id() == task.id()) {
            return Err(BoardRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        Ok(())
    }

    async fn edit_task(&self, id: TaskId, edit: &TaskEdit) -> BoardRepositoryResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .task_mut(id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        stored.apply(edit);
        Ok(stored.clone())
    }

    async fn set_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .task_mut(id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))?;
        stored.set_status(status, updated_at);
        Ok(stored.clone())
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(BoardRepositoryError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn tasks_in_list(&self, list_id: ListId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.list_id() == list_id)
            .cloned()
            .collect())
    }

    async fn delete_completed(&self, list_id: ListId) -> BoardRepositoryResult<Vec<TaskId>> {
        let mut state = self.state.write().map_err(poisoned)?;
        let removed: Vec<TaskId> = state
            .tasks
            .iter()
            .filter(|task| task.list_id() == list_id && task.is_completed())
            .map(Task::id)
            .collect();
        state
            .tasks
            .retain(|task| !(task.list_id() == list_id && task.is_completed()));
        Ok(removed)
    }
}
