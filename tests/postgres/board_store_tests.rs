//! Board store writes and schema constraints against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, TestResult, test_runtime};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, Error as DieselError};
use diesel::sql_types;
use homelist::board::{
    domain::{ListId, TaskEdit, TaskNotes, TaskStatus, TaskTitle},
    ports::{BoardRepositoryError, ListRepository, TaskRepository},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
fn clearing_removes_exactly_the_completed_rows(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "clear_completed")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let groceries = stores.personal_list(&alice).await?;
        let milk = stores.task(&groceries, "Milk", &alice).await?;
        let bread = stores.task(&groceries, "Bread", &alice).await?;
        let eggs = stores.task(&groceries, "Eggs", &alice).await?;
        for done in [&milk, &eggs] {
            stores
                .board
                .set_task_status(done.id(), TaskStatus::Completed, Utc::now())
                .await?;
        }

        let removed = stores.board.delete_completed(groceries.id()).await?;

        assert_eq!(removed.len(), 2);
        assert!(removed.contains(&milk.id()) && removed.contains(&eggs.id()));
        let remaining = stores.board.tasks_in_list(groceries.id()).await?;
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|task| task.id() == bread.id()));
        assert_eq!(stores.board.count_open_tasks(groceries.id()).await?, 1);
        assert!(stores.board.delete_completed(groceries.id()).await?.is_empty());
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn deleting_a_list_takes_its_tasks_with_it(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "delete_list")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let groceries = stores.personal_list(&alice).await?;
        let errands = stores.personal_list(&alice).await?;
        let milk = stores.task(&groceries, "Milk", &alice).await?;
        stores.task(&groceries, "Bread", &alice).await?;
        let post = stores.task(&errands, "Post office", &alice).await?;

        let removed = stores.board.delete_list(groceries.id()).await?;

        assert_eq!(removed, 2);
        assert!(stores.board.find_list(groceries.id()).await?.is_none());
        assert!(stores.board.find_task(milk.id()).await?.is_none());
        assert!(stores.board.tasks_in_list(groceries.id()).await?.is_empty());
        assert!(stores.board.find_task(post.id()).await?.is_some());

        let again = stores.board.delete_list(groceries.id()).await;
        assert!(matches!(again, Err(BoardRepositoryError::ListNotFound(id)) if id == groceries.id()));
        let unknown = ListId::new();
        let missing = stores.board.delete_list(unknown).await;
        assert!(matches!(missing, Err(BoardRepositoryError::ListNotFound(id)) if id == unknown));
        assert_eq!(stores.board.tasks_in_list(errands.id()).await?.len(), 1);
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn task_writes_touch_only_their_columns(shared_test_cluster: &'static TestCluster) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "narrow_task_writes")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let bob = stores.user("bob@example.com").await?;
        let groceries = stores.personal_list(&alice).await?;
        let milk = stores.task(&groceries, "Milk", &alice).await?;
        stores
            .board
            .edit_task(
                milk.id(),
                &TaskEdit::new(&DefaultClock).with_notes(TaskNotes::parse("semi-skimmed")),
            )
            .await?;
        stores
            .board
            .set_task_status(milk.id(), TaskStatus::Completed, Utc::now())
            .await?;

        let retitled = stores
            .board
            .edit_task(
                milk.id(),
                &TaskEdit::new(&DefaultClock).with_title(TaskTitle::new("Oat milk")?),
            )
            .await?;
        assert_eq!(retitled.title().as_str(), "Oat milk");
        assert_eq!(retitled.status(), TaskStatus::Completed);
        assert_eq!(retitled.notes().map(TaskNotes::as_str), Some("semi-skimmed"));

        stores
            .board
            .edit_task(milk.id(), &TaskEdit::new(&DefaultClock).with_assignee(bob.id()))
            .await?;
        let reopened = stores
            .board
            .set_task_status(milk.id(), TaskStatus::Open, Utc::now())
            .await?;
        assert_eq!(reopened.assignee_id(), bob.id());
        assert_eq!(reopened.title().as_str(), "Oat milk");

        let cleared = stores
            .board
            .edit_task(milk.id(), &TaskEdit::new(&DefaultClock).with_notes(None))
            .await?;
        assert!(cleared.notes().is_none());
        assert_eq!(cleared.status(), TaskStatus::Open);
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn writes_to_a_missing_task_are_not_found(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "missing_task")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let groceries = stores.personal_list(&alice).await?;
        let milk = stores.task(&groceries, "Milk", &alice).await?;
        stores.board.delete_task(milk.id()).await?;

        let edit = TaskEdit::new(&DefaultClock).with_title(TaskTitle::new("Oat milk")?);
        let edited = stores.board.edit_task(milk.id(), &edit).await;
        let toggled = stores
            .board
            .set_task_status(milk.id(), TaskStatus::Completed, Utc::now())
            .await;

        assert!(matches!(edited, Err(BoardRepositoryError::TaskNotFound(id)) if id == milk.id()));
        assert!(matches!(toggled, Err(BoardRepositoryError::TaskNotFound(id)) if id == milk.id()));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
#[case::both_owners(true, true)]
#[case::no_owner(false, false)]
fn lists_need_exactly_one_owner(
    shared_test_cluster: &'static TestCluster,
    #[case] personal: bool,
    #[case] family: bool,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "single_owner")?;
    let stores = database.stores()?;
    let (alice, smiths) = test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let smiths = stores.family(&alice, "Ab12Cd34").await?;
        Ok::<_, eyre::Report>((alice, smiths))
    })?;
    let mut conn = database.connect()?;

    let result = diesel::sql_query(concat!(
        "INSERT INTO lists (id, name, color, owner_id, family_id, created_at) ",
        "VALUES ($1, 'Groceries', '#00FF7F', $2, $3, NOW())",
    ))
    .bind::<sql_types::Uuid, _>(Uuid::new_v4())
    .bind::<sql_types::Nullable<sql_types::Uuid>, _>(personal.then_some(alice.id().into_inner()))
    .bind::<sql_types::Nullable<sql_types::Uuid>, _>(family.then_some(smiths.id().into_inner()))
    .execute(&mut conn);

    match result {
        Err(DieselError::DatabaseError(_, info)) => {
            assert_eq!(
                DatabaseErrorInformation::constraint_name(info.as_ref()),
                Some("lists_single_owner")
            );
            Ok(())
        }
        other => Err(eyre::eyre!("insert should violate the owner check, got {other:?}")),
    }
}
