//! Shared world state for task marketplace BDD scenarios.

use std::sync::Arc;

use datacomb::{
    action::{
        adapters::RecordingSigner,
        ports::SignerCapability,
        services::{ActionComposer, ActionError, ActionReceipt, ActionService},
    },
    chain::{
        adapters::InMemoryChainStore,
        domain::{AccountName, PostRef},
    },
    config::MarketplaceConfig,
    task::{
        codec::TaskCodec,
        domain::{TaskDraft, TaskRecord},
        services::{
            TaskDetails, TaskDetailsError, TaskDetailsService, TaskDiscoveryError,
            TaskDiscoveryService,
        },
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for marketplace behaviour tests.
pub struct MarketplaceWorld {
    pub chain: InMemoryChainStore,
    pub actions: ActionService<DefaultClock>,
    pub discovery: TaskDiscoveryService<InMemoryChainStore>,
    pub details: TaskDetailsService<InMemoryChainStore>,
    pub pending_requester: Option<AccountName>,
    pub pending_draft: Option<TaskDraft>,
    pub published_task: Option<PostRef>,
    pub last_action_result: Option<Result<ActionReceipt, ActionError>>,
    pub last_discovery_result: Option<Result<Vec<TaskRecord>, TaskDiscoveryError>>,
    pub last_details_result: Option<Result<Option<TaskDetails>, TaskDetailsError>>,
}

impl MarketplaceWorld {
    /// Creates a world backed by an empty in-memory chain.
    #[must_use]
    pub fn new() -> Self {
        let config = MarketplaceConfig::default();
        let chain = InMemoryChainStore::new();
        let store = Arc::new(chain.clone());
        let signer: Arc<dyn SignerCapability> =
            Arc::new(RecordingSigner::mirroring(chain.clone()));
        Self {
            actions: ActionService::new(
                ActionComposer::new(&config, Arc::new(DefaultClock)),
                Some(signer),
            ),
            discovery: TaskDiscoveryService::new(Arc::clone(&store), &config),
            details: TaskDetailsService::new(store, TaskCodec::from_config(&config)),
            chain,
            pending_requester: None,
            pending_draft: None,
            published_task: None,
            last_action_result: None,
            last_discovery_result: None,
            last_details_result: None,
        }
    }
}

impl Default for MarketplaceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MarketplaceWorld {
    MarketplaceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Publishes the pending draft and records the resulting post reference.
///
/// # Errors
///
/// Returns an error when no draft is pending or publication fails.
pub fn publish_pending(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    let requester = world
        .pending_requester
        .clone()
        .ok_or_else(|| eyre::eyre!("missing requester in scenario world"))?;
    let draft = world
        .pending_draft
        .take()
        .ok_or_else(|| eyre::eyre!("missing task draft in scenario world"))?;

    let result = run_async(world.actions.publish_task(&requester, draft));
    if let Ok(receipt) = &result {
        world.published_task = Some(PostRef::from_parts(
            requester.as_str(),
            &receipt.permlink,
        )?);
    }
    world.last_action_result = Some(result);
    Ok(())
}
