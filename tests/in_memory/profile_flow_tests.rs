//! In-memory integration tests for login, profiles and reputation gates.

use std::sync::Arc;

use datacomb::{
    account::{
        adapters::InMemorySessionStore,
        domain::{GatedAction, ReputationTier},
        services::{SessionError, SessionService, fetch_profile},
    },
    action::{
        adapters::{RecordingSigner, SignerCall},
        ports::{SignerCapability, SignerError},
    },
    chain::{
        adapters::InMemoryChainStore,
        domain::{AccountName, ChainAccount},
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestSessions = SessionService<InMemoryChainStore, InMemorySessionStore, DefaultClock>;

struct ProfileWorld {
    signer: RecordingSigner,
    sessions: TestSessions,
    chain: InMemoryChainStore,
}

#[fixture]
fn world() -> ProfileWorld {
    let chain = InMemoryChainStore::new();
    chain
        .insert_account(ChainAccount {
            name: "alice".to_owned(),
            reputation: 100_000_000_000,
            posting_json_metadata: r#"{"profile":{"name":"Alice A.","about":"labeler"}}"#
                .to_owned(),
            balance: "12.000 HIVE".to_owned(),
            hbd_balance: "3.500 HBD".to_owned(),
            post_count: 7,
        })
        .expect("seed account");
    let signer = RecordingSigner::new();
    let signer_capability: Arc<dyn SignerCapability> = Arc::new(signer.clone());
    ProfileWorld {
        sessions: SessionService::new(
            Arc::new(chain.clone()),
            Arc::new(InMemorySessionStore::new()),
            Some(signer_capability),
            Arc::new(DefaultClock),
        ),
        signer,
        chain,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_caches_profile_until_logout(world: ProfileWorld) -> Result<(), eyre::Report> {
    let profile = world.sessions.login("alice").await?;

    assert_eq!(profile.reputation, 43);
    assert_eq!(profile.display_name(), "Alice A.");
    assert_eq!(
        world.sessions.current().await?.map(|cached| cached.name),
        Some("alice".to_owned())
    );
    assert!(matches!(
        world.signer.calls()?.as_slice(),
        [SignerCall::SignMessage(request)] if request.message.starts_with("Login to DataComb - ")
    ));

    world.sessions.logout().await?;
    assert!(world.sessions.current().await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declined_challenge_caches_nothing(world: ProfileWorld) -> Result<(), eyre::Report> {
    world
        .signer
        .fail_with(SignerError::rejected("User canceled"))?;

    let result = world.sessions.login("alice").await;

    assert!(matches!(
        result,
        Err(SessionError::Rejected { ref message }) if message == "User canceled"
    ));
    assert!(world.sessions.current().await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fetched_reputation_drives_action_gates(world: ProfileWorld) -> Result<(), eyre::Report> {
    let profile = fetch_profile(&world.chain, &AccountName::new("alice")?).await?;
    let tier = ReputationTier::from_score(profile.reputation);

    assert_eq!(tier, ReputationTier::Silver);
    assert!(GatedAction::SubmitWork.permits(profile.reputation));
    assert!(GatedAction::CreateTask.permits(profile.reputation));
    assert!(!GatedAction::ValidateWork.permits(profile.reputation));
    Ok(())
}
