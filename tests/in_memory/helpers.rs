//! Shared fixtures for in-memory marketplace integration tests.

use std::sync::Arc;

use datacomb::{
    action::{
        adapters::RecordingSigner,
        ports::SignerCapability,
        services::{ActionComposer, ActionService},
    },
    chain::{adapters::InMemoryChainStore, domain::AccountName},
    config::MarketplaceConfig,
    task::{
        codec::TaskCodec,
        domain::TaskDraft,
        services::{TaskDetailsService, TaskDiscoveryService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// A marketplace wired entirely to in-memory adapters.
///
/// The signer mirrors accepted writes into the store, so reads observe
/// everything published through `actions`.
pub struct Marketplace {
    /// Shared chain store.
    pub chain: InMemoryChainStore,
    /// Signer that applies writes to `chain`.
    pub signer: RecordingSigner,
    /// Write dispatch.
    pub actions: ActionService<DefaultClock>,
    /// Task discovery over `chain`.
    pub discovery: TaskDiscoveryService<InMemoryChainStore>,
    /// Task inspection over `chain`.
    pub details: TaskDetailsService<InMemoryChainStore>,
}

/// Provides a fresh marketplace for each test.
#[fixture]
pub fn marketplace() -> Marketplace {
    let config = MarketplaceConfig::default();
    let chain = InMemoryChainStore::new();
    let signer = RecordingSigner::mirroring(chain.clone());
    let store = Arc::new(chain.clone());
    let signer_capability: Arc<dyn SignerCapability> = Arc::new(signer.clone());

    Marketplace {
        actions: ActionService::new(
            ActionComposer::new(&config, Arc::new(DefaultClock)),
            Some(signer_capability),
        ),
        discovery: TaskDiscoveryService::new(Arc::clone(&store), &config),
        details: TaskDetailsService::new(store, TaskCodec::from_config(&config)),
        chain,
        signer,
    }
}

/// Returns a validated account name.
///
/// # Errors
///
/// Returns an error when `name` is not a valid account name.
pub fn account(name: &str) -> Result<AccountName, eyre::Report> {
    Ok(AccountName::new(name)?)
}

/// Returns a complete image-labeling draft.
#[must_use]
pub fn labeling_draft() -> TaskDraft {
    TaskDraft::new(
        "Label Cats",
        "Tag every cat photo in the set.",
        "5 HIVE",
        "Image Labeling",
    )
    .with_instructions("Draw a box around each cat.")
    .with_data_type("Images")
    .with_max_submissions(3)
    .with_required_reputation("silver")
}
