//! Founding, joining and member visibility through the facade.

use crate::in_memory::helpers::{TestResult, api, sign_up, smiths};
use homelist::api::{ApiErrorKind, CreateFamilyBody, InMemoryHouseholdApi, JoinFamilyBody};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn founder_becomes_admin_and_joiner_a_member(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let alice = api.current_user(household.alice.session()).await?;
    let bob = api.current_user(household.bob.session()).await?;
    let family = api.family(household.bob.session()).await?;

    eyre::ensure!(alice.is_admin, "founder should be admin");
    eyre::ensure!(!bob.is_admin, "joiner should not be admin");
    assert_eq!(alice.family_id, Some(family.id));
    assert_eq!(bob.family_id, Some(family.id));
    assert_eq!(family.admin_id, alice.id);
    assert_eq!(family.name, "Smiths");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_are_listed_in_join_order(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let members = api.family_members(household.bob.session()).await?;

    let ids: Vec<_> = members.iter().map(|member| member.id).collect();
    assert_eq!(ids, vec![household.alice.user.id, household.bob.user.id]);
    let admins = members.iter().filter(|member| member.is_admin).count();
    assert_eq!(admins, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_second_family_is_refused(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let founding = api
        .create_family(
            household.bob.session(),
            CreateFamilyBody {
                name: "Bobs".to_owned(),
            },
        )
        .await;
    let code = api.family_invite_code(household.alice.session()).await?;
    let rejoin = api
        .join_family(household.bob.session(), JoinFamilyBody { invite_code: code.code })
        .await;

    for result in [founding.map(|_| ()), rejoin.map(|_| ())] {
        let err = result.err().ok_or_else(|| eyre::eyre!("second family should fail"))?;
        assert_eq!(err.kind, ApiErrorKind::AlreadyInFamily);
        assert_eq!(err.envelope.user_message(), "User is already part of a family");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_invite_code_is_rejected(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let result = api
        .join_family(
            household.eve.session(),
            JoinFamilyBody {
                invite_code: "ZZZZZZZZ".to_owned(),
            },
        )
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("join should fail"))?;
    assert_eq!(err.kind, ApiErrorKind::InvalidInviteCode);
    let eve = api.current_user(household.eve.session()).await?;
    eyre::ensure!(eve.family_id.is_none(), "failed join must not attach a family");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_have_no_family_views(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let family = api.family(household.eve.session()).await;
    let members = api.family_members(household.eve.session()).await;
    let code = api.family_invite_code(household.eve.session()).await;

    assert_eq!(family.err().map(|err| err.kind), Some(ApiErrorKind::NotInFamily));
    assert_eq!(members.err().map(|err| err.kind), Some(ApiErrorKind::NotInFamily));
    assert_eq!(code.err().map(|err| err.kind), Some(ApiErrorKind::NotInFamily));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_are_visible_only_within_the_family(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;

    let fellow = api
        .read_user(household.bob.session(), household.alice.user.id)
        .await?;
    let stranger = api
        .read_user(household.eve.session(), household.alice.user.id)
        .await;
    let own = api
        .read_user(household.eve.session(), household.eve.user.id)
        .await?;

    eyre::ensure!(fellow.is_admin, "Alice should read back as admin");
    let err = stranger.err().ok_or_else(|| eyre::eyre!("stranger lookup should fail"))?;
    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.envelope.user_message(), "User not found");
    assert_eq!(own.id, household.eve.user.id);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invite_codes_are_distinct_per_family(api: InMemoryHouseholdApi) -> TestResult {
    let household = smiths(&api).await?;
    let carol = sign_up(&api, "carol@example.com", "Carol").await?;

    api.create_family(
        household.eve.session(),
        CreateFamilyBody {
            name: "Eves".to_owned(),
        },
    )
    .await?;
    let smith_code = api.family_invite_code(household.alice.session()).await?;
    let eve_code = api.family_invite_code(household.eve.session()).await?;
    api.join_family(carol.session(), JoinFamilyBody { invite_code: eve_code.code.clone() })
        .await?;

    eyre::ensure!(smith_code.code != eve_code.code, "codes must differ");
    let carol_family = api.family(carol.session()).await?;
    assert_eq!(carol_family.name, "Eves");
    Ok(())
}
