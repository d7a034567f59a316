//! Registration, login and credential handling through the facade.

use crate::in_memory::helpers::{TEST_PASSWORD, TestResult, api, sign_up};
use homelist::{
    api::{ApiErrorKind, InMemoryHouseholdApi, LoginBody, PONG, RegisterBody},
    identity::domain::BearerCredential,
};
use rstest::rstest;

#[rstest]
fn ping_answers_pong(api: InMemoryHouseholdApi) {
    assert_eq!(api.ping(), PONG);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_opens_a_session(api: InMemoryHouseholdApi) -> TestResult {
    let account = sign_up(&api, "Ann@Example.com", "Ann").await?;

    let current = api.current_user(account.session()).await?;

    eyre::ensure!(current.id == account.user.id, "session should resolve to the new user");
    eyre::ensure!(current.family_id.is_none(), "new users have no family");
    eyre::ensure!(!current.is_admin, "new users are not admins");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_issues_a_usable_bearer_token(api: InMemoryHouseholdApi) -> TestResult {
    let account = sign_up(&api, "ann@example.com", "Ann").await?;

    let token = api
        .login(LoginBody {
            email: "ann@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await?;
    let credential = BearerCredential::new(format!("Bearer {}", token.access_token));
    let current = api.current_user(Some(&credential)).await?;

    assert_eq!(token.token_type, "bearer");
    assert_eq!(current.id, account.user.id);
    Ok(())
}

#[rstest]
#[case::wrong_password("ann@example.com", "not-the-password")]
#[case::unknown_email("nobody@example.com", TEST_PASSWORD)]
#[tokio::test(flavor = "multi_thread")]
async fn login_rejects_bad_credentials_identically(
    api: InMemoryHouseholdApi,
    #[case] email: &str,
    #[case] password: &str,
) -> TestResult {
    sign_up(&api, "ann@example.com", "Ann").await?;

    let result = api
        .login(LoginBody {
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("login should fail"))?;
    assert_eq!(err.kind, ApiErrorKind::InvalidCredentials);
    assert_eq!(err.envelope.user_message(), "Incorrect email or password");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_a_conflict(api: InMemoryHouseholdApi) -> TestResult {
    sign_up(&api, "ann@example.com", "Ann").await?;

    let result = api
        .register(RegisterBody {
            email: "ann@example.com".to_owned(),
            name: None,
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("duplicate should fail"))?;
    assert_eq!(err.kind, ApiErrorKind::Conflict);
    assert_eq!(err.status_code(), 409);
    Ok(())
}

#[rstest]
#[case::short_password("ann@example.com", "abc", "password")]
#[case::bad_email("not-an-email", TEST_PASSWORD, "email")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_registration_reports_the_field(
    api: InMemoryHouseholdApi,
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
) -> TestResult {
    let result = api
        .register(RegisterBody {
            email: email.to_owned(),
            name: None,
            password: password.to_owned(),
        })
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("registration should fail"))?;
    assert_eq!(err.kind, ApiErrorKind::Validation);
    let rendered = serde_json::to_value(&err.envelope)?;
    assert_eq!(rendered["detail"][0]["loc"][1], field);
    Ok(())
}

#[rstest]
#[case::missing(None)]
#[case::garbage(Some(BearerCredential::new("not-a-token")))]
#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_calls_are_rejected(
    api: InMemoryHouseholdApi,
    #[case] credential: Option<BearerCredential>,
) -> TestResult {
    let result = api.current_user(credential.as_ref()).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("call should be rejected"))?;
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    assert_eq!(err.status_code(), 401);
    Ok(())
}
