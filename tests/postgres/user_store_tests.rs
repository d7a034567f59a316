//! User store constraint mapping against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, TestResult, test_runtime};
use homelist::identity::{
    domain::{EmailAddress, PasswordHash, User},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

#[rstest]
fn second_account_for_an_email_is_a_duplicate(
    shared_test_cluster: &'static TestCluster,
) -> TestResult {
    let database = TestDatabase::create(shared_test_cluster, "duplicate_email")?;
    let stores = database.stores()?;

    test_runtime()?.block_on(async {
        let alice = stores.user("alice@example.com").await?;
        let impostor = User::register(
            EmailAddress::new("ALICE@example.com")?,
            None,
            PasswordHash::new("$argon2id$other")?,
            &DefaultClock,
        );

        let result = stores.users.store(&impostor).await;

        assert!(matches!(result, Err(UserRepositoryError::DuplicateEmail(_))));
        let found = stores.users.find_by_email(alice.email()).await?;
        assert_eq!(found.map(|user| user.id()), Some(alice.id()));
        Ok::<_, eyre::Report>(())
    })
}
