//! Read-only port over the chain's posts, comments and accounts.

use crate::chain::domain::{AccountName, ChainAccount, ChainPost, PostRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chain store operations.
pub type ChainStoreResult<T> = Result<T, ChainStoreError>;

/// Query for the most recent top-level posts under a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionQuery {
    /// Tag to query.
    pub tag: String,
    /// Maximum number of posts returned.
    pub limit: u32,
}

impl DiscussionQuery {
    /// Creates a query for `limit` posts under `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>, limit: u32) -> Self {
        Self {
            tag: tag.into(),
            limit,
        }
    }
}

/// Upstream store read contract.
///
/// Implementations issue one logical request per call. Callers own any
/// retry policy.
#[async_trait]
pub trait ChainStore: Send + Sync {
    /// Fetches an account record by name.
    ///
    /// Returns `None` when the account does not exist.
    async fn get_account(&self, name: &AccountName) -> ChainStoreResult<Option<ChainAccount>>;

    /// Fetches the most recently created posts under a tag, newest first.
    async fn get_discussions_by_created(
        &self,
        query: &DiscussionQuery,
    ) -> ChainStoreResult<Vec<ChainPost>>;

    /// Fetches a single post or comment.
    ///
    /// Returns `None` when the store has no such post.
    async fn get_content(&self, post_ref: &PostRef) -> ChainStoreResult<Option<ChainPost>>;

    /// Fetches the direct replies to a post or comment.
    async fn get_content_replies(&self, post_ref: &PostRef) -> ChainStoreResult<Vec<ChainPost>>;
}

/// Errors returned by chain store implementations.
#[derive(Debug, Clone, Error)]
pub enum ChainStoreError {
    /// The node could not be reached or the request timed out.
    #[error("chain node unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The node answered with a JSON-RPC error object.
    #[error("chain node returned error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },

    /// The node answered with a payload that does not match the expected
    /// shape.
    #[error("unexpected chain node response: {0}")]
    InvalidResponse(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChainStoreError {
    /// Wraps a transport-level error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a response-decoding error.
    pub fn invalid_response(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidResponse(Arc::new(err))
    }
}
