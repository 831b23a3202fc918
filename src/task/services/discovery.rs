//! Task discovery over the most recent posts under a tag.

use crate::chain::ports::{ChainStore, ChainStoreError, DiscussionQuery};
use crate::config::MarketplaceConfig;
use crate::task::{
    codec::{DecodeSource, TaskCodec},
    domain::TaskRecord,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors returned by task discovery.
///
/// A failed store query is the only failure mode; no partial list is
/// returned with it.
#[derive(Debug, Error)]
pub enum TaskDiscoveryError {
    /// The upstream query failed.
    #[error(transparent)]
    Store(#[from] ChainStoreError),
}

/// Result type for task discovery operations.
pub type TaskDiscoveryResult<T> = Result<T, TaskDiscoveryError>;

/// Derives task records from the most recent posts under a tag.
///
/// Only one page of posts is read, so older tasks fall out of view. Every
/// returned post yields exactly one record in the store's newest-first
/// order; no deduplication or re-sorting happens here. Store failures are
/// not retried.
#[derive(Clone)]
pub struct TaskDiscoveryService<S>
where
    S: ChainStore,
{
    store: Arc<S>,
    codec: TaskCodec,
    default_tag: String,
    page_size: u32,
}

impl<S> TaskDiscoveryService<S>
where
    S: ChainStore,
{
    /// Creates a discovery service.
    #[must_use]
    pub fn new(store: Arc<S>, config: &MarketplaceConfig) -> Self {
        Self {
            store,
            codec: TaskCodec::from_config(config),
            default_tag: config.tag.clone(),
            page_size: config.page_size,
        }
    }

    /// Discovers tasks under the configured marketplace tag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDiscoveryError::Store`] when the upstream query fails.
    pub async fn discover_marketplace(&self) -> TaskDiscoveryResult<Vec<TaskRecord>> {
        self.discover(&self.default_tag).await
    }

    /// Discovers tasks under `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDiscoveryError::Store`] when the upstream query fails.
    pub async fn discover(&self, tag: &str) -> TaskDiscoveryResult<Vec<TaskRecord>> {
        let query = DiscussionQuery::new(tag, self.page_size);
        let posts = self.store.get_discussions_by_created(&query).await?;

        let mut synthesized = 0_usize;
        let records: Vec<TaskRecord> = posts
            .iter()
            .map(|post| {
                let (record, source) = self.codec.decode_with_source(post);
                if source == DecodeSource::Synthesized {
                    synthesized += 1;
                }
                record
            })
            .collect();

        info!(
            tag,
            posts = posts.len(),
            synthesized,
            "discovered marketplace tasks"
        );
        Ok(records)
    }
}
