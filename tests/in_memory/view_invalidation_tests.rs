//! Stale view tracking driven by facade mutations.

use crate::in_memory::helpers::{Smiths, TestResult, api, sign_up, smiths};
use homelist::{
    api::{CreateFamilyBody, CreateListBody, CreateTaskBody, InMemoryHouseholdApi, TaskStatusBody},
    views::{StaleViews, ViewKey},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn founding_a_family_stales_membership_views(api: InMemoryHouseholdApi) -> TestResult {
    let ann = sign_up(&api, "ann@example.com", "Ann").await?;
    let mut views = StaleViews::new();
    for key in [ViewKey::FamilyMembers, ViewKey::PersonalLists, ViewKey::FamilyLists] {
        views.mark_fetched(key);
    }
    views.mark_fetched(ViewKey::CurrentUser);

    let mutation = api
        .create_family(
            ann.session(),
            CreateFamilyBody {
                name: "Anns".to_owned(),
            },
        )
        .await?;
    views.apply(mutation);

    eyre::ensure!(views.is_stale(&ViewKey::FamilyMembers), "members view should be stale");
    eyre::ensure!(views.is_stale(&ViewKey::PersonalLists), "personal lists should be stale");
    eyre::ensure!(views.is_stale(&ViewKey::FamilyLists), "family lists should be stale");
    eyre::ensure!(!views.is_stale(&ViewKey::CurrentUser), "profile view is untouched");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_mutations_stale_only_their_list(api: InMemoryHouseholdApi) -> TestResult {
    let Smiths { alice, .. } = smiths(&api).await?;
    let body = |name: &str| CreateListBody {
        name: name.to_owned(),
        color: "#112233".to_owned(),
        is_family_list: true,
    };
    let groceries = api.create_list(alice.session(), body("Groceries")).await?;
    let chores = api.create_list(alice.session(), body("Chores")).await?;
    eyre::ensure!(
        groceries.invalidates(&ViewKey::FamilyLists),
        "creating a family list should stale the family collection"
    );
    let groceries_id = groceries.into_value().id;
    let chores_id = chores.into_value().id;

    let mut views = StaleViews::new();
    for id in [groceries_id, chores_id] {
        views.mark_fetched(ViewKey::Tasks(id));
        views.mark_fetched(ViewKey::TaskCount(id));
    }

    let created = api
        .create_task(
            alice.session(),
            CreateTaskBody {
                list_id: groceries_id,
                title: "Eggs".to_owned(),
                notes: None,
                user_id: None,
            },
        )
        .await?;
    let task = views.apply(created);

    eyre::ensure!(views.is_stale(&ViewKey::Tasks(groceries_id)), "task view should be stale");
    eyre::ensure!(views.is_stale(&ViewKey::TaskCount(groceries_id)), "count should be stale");
    eyre::ensure!(!views.is_stale(&ViewKey::Tasks(chores_id)), "other list is untouched");

    views.mark_fetched(ViewKey::Tasks(groceries_id));
    let status = api
        .update_task_status(alice.session(), task.id, TaskStatusBody { completed: true })
        .await?;
    eyre::ensure!(
        status.invalidates(&ViewKey::Tasks(groceries_id)),
        "status change should stale the task view"
    );
    Ok(())
}
