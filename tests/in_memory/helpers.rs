//! Shared test helpers for in-memory household integration tests.

use homelist::{
    api::{CreateFamilyBody, InMemoryHouseholdApi, JoinFamilyBody, RegisterBody, UserPublic},
    config::{HASH_ITERATIONS_VAR, HASH_MEMORY_VAR, HouseholdConfig, SECRET_KEY_VAR},
    identity::domain::BearerCredential,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Signing secret long enough to pass configuration checks.
pub const TEST_SECRET: &str = "integration-secret-with-enough-bytes-0123";

/// Password shared by every test account.
pub const TEST_PASSWORD: &str = "hunter22";

/// Result type for integration tests.
pub type TestResult<T = ()> = Result<T, eyre::Report>;

/// Builds a configuration with cheap hashing costs.
///
/// # Errors
///
/// Returns an error if the configuration is rejected.
pub fn test_config() -> TestResult<HouseholdConfig> {
    let config = HouseholdConfig::from_lookup(|key| match key {
        SECRET_KEY_VAR => Some(TEST_SECRET.to_owned()),
        HASH_MEMORY_VAR => Some("64".to_owned()),
        HASH_ITERATIONS_VAR => Some("1".to_owned()),
        _ => None,
    })?;
    Ok(config)
}

/// Provides a fresh in-memory household for each test.
#[fixture]
pub fn api() -> InMemoryHouseholdApi {
    let built = test_config().and_then(|config| {
        InMemoryHouseholdApi::in_memory(&config, Arc::new(DefaultClock)).map_err(eyre::Report::from)
    });
    match built {
        Ok(household) => household,
        Err(err) => panic!("in-memory household should build: {err}"),
    }
}

/// A registered account and its session credential.
pub struct Account {
    /// Public view of the user at registration time.
    pub user: UserPublic,
    /// Credential attached to authenticated calls.
    pub session: BearerCredential,
}

impl Account {
    /// Returns the session for passing to the facade.
    pub const fn session(&self) -> Option<&BearerCredential> {
        Some(&self.session)
    }
}

/// Registers an account under `email` and returns its session.
///
/// # Errors
///
/// Returns an error if registration fails.
pub async fn sign_up(api: &InMemoryHouseholdApi, email: &str, name: &str) -> TestResult<Account> {
    let signup = api
        .register(RegisterBody {
            email: email.to_owned(),
            name: Some(name.to_owned()),
            password: TEST_PASSWORD.to_owned(),
        })
        .await?;
    Ok(Account {
        user: signup.user,
        session: BearerCredential::new(signup.token.access_token),
    })
}

/// The Smith household: Alice founded it, Bob joined, Eve is on her own.
pub struct Smiths {
    /// Family admin.
    pub alice: Account,
    /// Ordinary member.
    pub bob: Account,
    /// Registered user outside the family.
    pub eve: Account,
}

/// Sets up the Smith household.
///
/// # Errors
///
/// Returns an error if any registration or membership call fails.
pub async fn smiths(api: &InMemoryHouseholdApi) -> TestResult<Smiths> {
    let alice = sign_up(api, "alice@example.com", "Alice").await?;
    let bob = sign_up(api, "bob@example.com", "Bob").await?;
    let eve = sign_up(api, "eve@example.com", "Eve").await?;

    api.create_family(
        alice.session(),
        CreateFamilyBody {
            name: "Smiths".to_owned(),
        },
    )
    .await?;
    let code = api.family_invite_code(alice.session()).await?;
    api.join_family(bob.session(), JoinFamilyBody { invite_code: code.code })
        .await?;

    Ok(Smiths { alice, bob, eve })
}
