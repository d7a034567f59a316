//! Family store commits and constraint mapping against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, TestResult, test_runtime};
use homelist::family::{
    domain::{Family, FamilyId, FamilyName, InviteCode, Membership},
    ports::{FamilyRepository, FamilyRepositoryError},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

#[rstest]
fn taken_invite_code_is_reported_and_rolled_back(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "taken_invite_code")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let bob = stores.user("bob@example.com").await?;
        let smiths = stores.family(&alice, "Ab12Cd34").await?;
        let joneses = Family::found(
            FamilyName::new("Joneses")?,
            bob.id(),
            InviteCode::parse("Ab12Cd34")?,
            &DefaultClock,
        );
        let founder = Membership::begin(bob.id(), joneses.id(), &DefaultClock);

        let result = stores.families.create_with_founder(&joneses, &founder).await;

        assert!(matches!(
            result,
            Err(FamilyRepositoryError::DuplicateInviteCode(ref code)) if code.as_str() == "Ab12Cd34"
        ));
        assert!(stores.families.find_by_id(joneses.id()).await?.is_none());
        assert!(stores.families.find_membership(bob.id()).await?.is_none());
        let holder = stores.families.find_by_invite_code(smiths.invite_code()).await?;
        assert_eq!(holder.map(|family| family.id()), Some(smiths.id()));
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn founding_while_in_a_family_is_already_member(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "founder_already_member")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        stores.family(&alice, "Ab12Cd34").await?;
        let second = Family::found(
            FamilyName::new("Second")?,
            alice.id(),
            InviteCode::parse("Ef56Gh78")?,
            &DefaultClock,
        );
        let founder = Membership::begin(alice.id(), second.id(), &DefaultClock);

        let result = stores.families.create_with_founder(&second, &founder).await;

        assert!(matches!(result, Err(FamilyRepositoryError::AlreadyMember(id)) if id == alice.id()));
        assert!(stores.families.find_by_id(second.id()).await?.is_none());
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn joining_twice_is_already_member(shared_test_cluster: &'static TestCluster) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "join_twice")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let bob = stores.user("bob@example.com").await?;
        let carol = stores.user("carol@example.com").await?;
        let smiths = stores.family(&alice, "Ab12Cd34").await?;
        let joneses = stores.family(&carol, "Ef56Gh78").await?;
        stores
            .families
            .add_member(&Membership::begin(bob.id(), smiths.id(), &DefaultClock))
            .await?;

        let result = stores
            .families
            .add_member(&Membership::begin(bob.id(), joneses.id(), &DefaultClock))
            .await;

        assert!(matches!(result, Err(FamilyRepositoryError::AlreadyMember(id)) if id == bob.id()));
        let members: Vec<_> = stores
            .families
            .list_members(smiths.id())
            .await?
            .into_iter()
            .map(|membership| membership.user_id())
            .collect();
        assert_eq!(members, vec![alice.id(), bob.id()]);
        assert_eq!(stores.families.list_members(joneses.id()).await?.len(), 1);
        Ok::<_, eyre::Report>(())
    })
}

#[rstest]
fn joining_an_unknown_family_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "join_unknown")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let bob = stores.user("bob@example.com").await?;
        let missing = FamilyId::new();

        let result = stores
            .families
            .add_member(&Membership::begin(bob.id(), missing, &DefaultClock))
            .await;

        assert!(matches!(result, Err(FamilyRepositoryError::FamilyNotFound(id)) if id == missing));
        Ok::<_, eyre::Report>(())
    })
}
