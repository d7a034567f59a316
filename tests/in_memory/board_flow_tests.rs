//! Lists, tasks and assignment rules exercised end to end.

use crate::in_memory::helpers::{Account, Smiths, TestResult, api, smiths};
use homelist::{
    api::{
        ApiErrorKind, CreateListBody, CreateTaskBody, InMemoryHouseholdApi, ListPublic,
        TaskPublic, TaskStatusBody, UpdateListBody, UpdateTaskBody,
    },
    views::ListKind,
};
use rstest::rstest;

async fn family_list(api: &InMemoryHouseholdApi, owner: &Account) -> TestResult<ListPublic> {
    let created = api
        .create_list(
            owner.session(),
            CreateListBody {
                name: "Groceries".to_owned(),
                color: "ff8800".to_owned(),
                is_family_list: true,
            },
        )
        .await?;
    Ok(created.into_value())
}

async fn personal_list(api: &InMemoryHouseholdApi, owner: &Account) -> TestResult<ListPublic> {
    let created = api
        .create_list(
            owner.session(),
            CreateListBody {
                name: "Errands".to_owned(),
                color: "#00aa00".to_owned(),
                is_family_list: false,
            },
        )
        .await?;
    Ok(created.into_value())
}

async fn task_for(
    api: &InMemoryHouseholdApi,
    creator: &Account,
    list: &ListPublic,
    assignee: Option<&Account>,
) -> TestResult<TaskPublic> {
    let created = api
        .create_task(
            creator.session(),
            CreateTaskBody {
                list_id: list.id,
                title: "Buy milk".to_owned(),
                notes: None,
                user_id: assignee.map(|account| account.user.id),
            },
        )
        .await?;
    Ok(created.into_value())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_are_normalized_and_partitioned(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;

    let shared = family_list(&api, &alice).await?;
    let own = personal_list(&api, &bob).await?;

    assert_eq!(shared.color, "#FF8800");
    assert_eq!(shared.kind, ListKind::Family);
    assert_eq!(shared.owner_id, None);
    assert_eq!(own.kind, ListKind::Personal);
    assert_eq!(own.owner_id, Some(bob.user.id));

    let bob_family = api.family_lists(bob.session()).await?;
    let bob_personal = api.personal_lists(bob.session()).await?;
    let alice_personal = api.personal_lists(alice.session()).await?;
    assert_eq!(bob_family.iter().map(|list| list.id).collect::<Vec<_>>(), vec![shared.id]);
    assert_eq!(bob_personal.iter().map(|list| list.id).collect::<Vec<_>>(), vec![own.id]);
    eyre::ensure!(alice_personal.is_empty(), "Bob's personal list must stay private");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn family_list_requires_a_family(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { eve, .. } = smiths(&api).await?;

    let result = family_list(&api, &eve).await;
    let lists = api.family_lists(eve.session()).await;

    eyre::ensure!(result.is_err(), "family list without a family should fail");
    assert_eq!(lists.err().map(|err| err.kind), Some(ApiErrorKind::NotInFamily));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_are_forbidden_from_family_lists(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, eve, .. } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;

    let read = api.list(eve.session(), shared.id).await;
    let tasks = api.tasks(eve.session(), shared.id).await;
    let rename = api
        .update_list(
            eve.session(),
            shared.id,
            UpdateListBody {
                name: Some("Mine now".to_owned()),
                color: None,
            },
        )
        .await;

    assert_eq!(read.err().map(|err| err.kind), Some(ApiErrorKind::Forbidden));
    assert_eq!(tasks.err().map(|err| err.kind), Some(ApiErrorKind::Forbidden));
    assert_eq!(rename.err().map(|err| err.kind), Some(ApiErrorKind::Forbidden));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_assign_others(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;

    let result = task_for(&api, &bob, &shared, Some(&alice)).await;
    let own = task_for(&api, &bob, &shared, None).await?;

    let err = result.err().ok_or_else(|| eyre::eyre!("member assignment should fail"))?;
    eyre::ensure!(
        err.to_string().contains("Not enough permissions to assign tasks to others"),
        "unexpected error: {err}"
    );
    assert_eq!(own.user_id, bob.user.id);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_assigns_members_but_not_strangers(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, eve } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;

    let assigned = task_for(&api, &alice, &shared, Some(&bob)).await?;
    let stranger = task_for(&api, &alice, &shared, Some(&eve)).await;

    assert_eq!(assigned.user_id, bob.user.id);
    let err = stranger.err().ok_or_else(|| eyre::eyre!("stranger assignment should fail"))?;
    eyre::ensure!(err.to_string().contains("Validation"), "unexpected error: {err}");
    let tasks = api.tasks(alice.session(), shared.id).await?;
    assert_eq!(tasks.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn personal_lists_reject_cross_assignment(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;
    let own = personal_list(&api, &alice).await?;

    let result = task_for(&api, &alice, &own, Some(&bob)).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("cross assignment should fail"))?;
    eyre::ensure!(
        err.to_string().contains("InsufficientPermissions"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_is_checked_only_on_change(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;
    let task = task_for(&api, &alice, &shared, Some(&bob)).await?;

    let retitled = api
        .update_task(
            bob.session(),
            task.id,
            UpdateTaskBody {
                title: Some("Buy oat milk".to_owned()),
                notes: Some("two cartons".to_owned()),
                user_id: Some(bob.user.id),
            },
        )
        .await?
        .into_value();
    let handed_back = api
        .update_task(
            bob.session(),
            task.id,
            UpdateTaskBody {
                user_id: Some(alice.user.id),
                ..UpdateTaskBody::default()
            },
        )
        .await;

    assert_eq!(retitled.title, "Buy oat milk");
    assert_eq!(retitled.notes.as_deref(), Some("two cartons"));
    assert_eq!(
        handed_back.err().map(|err| err.kind),
        Some(ApiErrorKind::InsufficientPermissions)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_removes_only_completed_tasks(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;
    let done = task_for(&api, &alice, &shared, Some(&bob)).await?;
    let pending = task_for(&api, &bob, &shared, None).await?;

    let completed = api
        .update_task_status(bob.session(), done.id, TaskStatusBody { completed: true })
        .await?
        .into_value();
    let counted = api.list(alice.session(), shared.id).await?;
    api.clear_completed(bob.session(), shared.id).await?;
    let remaining = api.tasks(alice.session(), shared.id).await?;

    eyre::ensure!(completed.completed, "task should be marked completed");
    assert_eq!(counted.task_count, 1, "only open tasks are counted");
    assert_eq!(
        remaining.iter().map(|task| task.id).collect::<Vec<_>>(),
        vec![pending.id]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_its_tasks(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, bob, .. } = smiths(&api).await?;
    let shared = family_list(&api, &alice).await?;
    let task = task_for(&api, &alice, &shared, None).await?;

    api.delete_list(bob.session(), shared.id).await?;

    let read = api.list(alice.session(), shared.id).await;
    let status = api
        .update_task_status(alice.session(), task.id, TaskStatusBody { completed: true })
        .await;
    assert_eq!(read.err().map(|err| err.kind), Some(ApiErrorKind::NotFound));
    assert_eq!(status.err().map(|err| err.kind), Some(ApiErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_leaves_the_list(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, .. } = smiths(&api).await?;
    let own = personal_list(&api, &alice).await?;
    let task = task_for(&api, &alice, &own, None).await?;

    api.delete_task(alice.session(), task.id).await?;
    let again = api.delete_task(alice.session(), task.id).await;

    let list = api.list(alice.session(), own.id).await?;
    assert_eq!(list.task_count, 0);
    let err = again.err().ok_or_else(|| eyre::eyre!("second delete should fail"))?;
    assert_eq!(err.envelope.user_message(), "Task not found");
    Ok(())
}
