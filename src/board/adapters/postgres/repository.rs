//! `PostgreSQL` store implementing both board repository ports.

use super::{
    models::{ListChangeset, ListRow, TaskEditChangeset, TaskRow},
    schema::{lists, tasks},
};
use crate::board::{
    domain::{
        ListColor, ListId, ListName, ListOwner, PersistedListData, PersistedTaskData, Task,
        TaskEdit, TaskId, TaskList, TaskNotes, TaskStatus, TaskTitle,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult, ListRepository, TaskRepository},
};
use crate::family::domain::FamilyId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::io;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed list and task store.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl ListRepository for PostgresBoardStore {
    async fn store_list(&self, list: &TaskList) -> BoardRepositoryResult<()> {
        let row = to_list_row(list);
        let list_id = list.id();
        self.run_blocking(move |connection| {
            diesel::insert_into(lists::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateList(list_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_list(&self, list: &TaskList) -> BoardRepositoryResult<()> {
        let list_id = list.id();
        let changes = ListChangeset {
            name: list.name().as_str().to_owned(),
            color: list.color().as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(lists::table.filter(lists::id.eq(list_id.into_inner())))
                .set(&changes)
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(BoardRepositoryError::ListNotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_list(&self, id: ListId) -> BoardRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let outcome = connection.transaction::<_, DieselError, _>(|tx| {
                let removed_tasks =
                    diesel::delete(tasks::table.filter(tasks::list_id.eq(id.into_inner())))
                        .execute(tx)?;
                let removed_lists =
                    diesel::delete(lists::table.filter(lists::id.eq(id.into_inner())))
                        .execute(tx)?;
                if removed_lists == 0 {
                    return Err(DieselError::RollbackTransaction);
                }
                Ok(removed_tasks)
            });
            match outcome {
                Ok(removed_tasks) => Ok(removed_tasks),
                Err(DieselError::RollbackTransaction) => {
                    Err(BoardRepositoryError::ListNotFound(id))
                }
                Err(err) => Err(BoardRepositoryError::persistence(err)),
            }
        })
        .await
    }

    async fn find_list(&self, id: ListId) -> BoardRepositoryResult<Option<TaskList>> {
        self.run_blocking(move |connection| {
            let row = lists::table
                .filter(lists::id.eq(id.into_inner()))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn lists_owned_by(&self, owner: ListOwner) -> BoardRepositoryResult<Vec<TaskList>> {
        self.run_blocking(move |connection| {
            let mut query = lists::table
                .select(ListRow::as_select())
                .order((lists::created_at.asc(), lists::id.asc()))
                .into_boxed();
            query = match owner {
                ListOwner::Personal { owner_id } => {
                    query.filter(lists::owner_id.eq(owner_id.into_inner()))
                }
                ListOwner::Family { family_id } => {
                    query.filter(lists::family_id.eq(family_id.into_inner()))
                }
            };
            let rows = query
                .load::<ListRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn count_open_tasks(&self, id: ListId) -> BoardRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::list_id.eq(id.into_inner()))
                .filter(tasks::completed.eq(false))
                .count()
                .get_result(connection)
                .map_err(BoardRepositoryError::persistence)?;
            usize::try_from(count).map_err(BoardRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let row = to_task_row(task);
        let task_id = task.id();
        let list_id = task.list_id();
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        BoardRepositoryError::ListNotFound(list_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn edit_task(&self, id: TaskId, edit: &TaskEdit) -> BoardRepositoryResult<Task> {
        let changes = to_edit_changeset(edit);
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changes)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map_or(Err(BoardRepositoryError::TaskNotFound(id)), row_to_task)
        })
        .await
    }

    async fn set_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set((
                    tasks::completed.eq(status.is_completed()),
                    tasks::updated_at.eq(updated_at),
                ))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map_or(Err(BoardRepositoryError::TaskNotFound(id)), row_to_task)
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;
            if removed == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn tasks_in_list(&self, list_id: ListId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::list_id.eq(list_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete_completed(&self, list_id: ListId) -> BoardRepositoryResult<Vec<TaskId>> {
        self.run_blocking(move |connection| {
            let removed: Vec<uuid::Uuid> = diesel::delete(
                tasks::table
                    .filter(tasks::list_id.eq(list_id.into_inner()))
                    .filter(tasks::completed.eq(true)),
            )
            .returning(tasks::id)
            .get_results(connection)
            .map_err(BoardRepositoryError::persistence)?;
            Ok(removed.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }
}

fn to_list_row(list: &TaskList) -> ListRow {
    let (owner_id, family_id) = match list.owner() {
        ListOwner::Personal { owner_id } => (Some(owner_id.into_inner()), None),
        ListOwner::Family { family_id } => (None, Some(family_id.into_inner())),
    };
    ListRow {
        id: list.id().into_inner(),
        name: list.name().as_str().to_owned(),
        color: list.color().as_str().to_owned(),
        owner_id,
        family_id,
        created_at: list.created_at(),
    }
}

fn row_to_list(row: ListRow) -> BoardRepositoryResult<TaskList> {
    let ListRow {
        id,
        name,
        color,
        owner_id,
        family_id,
        created_at,
    } = row;

    let owner = match (owner_id, family_id) {
        (Some(user), None) => ListOwner::Personal {
            owner_id: UserId::from_uuid(user),
        },
        (None, Some(family)) => ListOwner::Family {
            family_id: FamilyId::from_uuid(family),
        },
        _ => {
            return Err(BoardRepositoryError::invalid_persisted_data(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("list {id} must have exactly one owner"),
            )));
        }
    };
    let list_name = ListName::new(name).map_err(BoardRepositoryError::invalid_persisted_data)?;
    let list_color = ListColor::parse(color).map_err(BoardRepositoryError::invalid_persisted_data)?;

    Ok(TaskList::from_persisted(PersistedListData {
        id: ListId::from_uuid(id),
        name: list_name,
        color: list_color,
        owner,
        created_at,
    }))
}

fn to_task_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        title: task.title().as_str().to_owned(),
        notes: task.notes().map(|notes| notes.as_str().to_owned()),
        completed: task.is_completed(),
        assignee_id: task.assignee_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_edit_changeset(edit: &TaskEdit) -> TaskEditChangeset {
    TaskEditChangeset {
        title: edit.title().map(|title| title.as_str().to_owned()),
        notes: edit
            .notes()
            .map(|notes| notes.map(|text| text.as_str().to_owned())),
        assignee_id: edit.assignee_id().map(UserId::into_inner),
        updated_at: edit.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    let TaskRow {
        id,
        list_id,
        title,
        notes,
        completed,
        assignee_id,
        created_at,
        updated_at,
    } = row;

    let task_title = TaskTitle::new(title).map_err(BoardRepositoryError::invalid_persisted_data)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        list_id: ListId::from_uuid(list_id),
        title: task_title,
        notes: notes.and_then(TaskNotes::parse),
        status: TaskStatus::from_completed(completed),
        assignee_id: UserId::from_uuid(assignee_id),
        created_at,
        updated_at,
    }))
}
