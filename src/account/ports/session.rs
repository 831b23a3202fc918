//! Session store port.

use crate::account::domain::UserProfile;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionStoreError>;

/// Persistence for the logged-in profile.
///
/// Holds at most one profile. Saving overwrites it wholesale.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the cached profile, if any.
    async fn load(&self) -> SessionResult<Option<UserProfile>>;

    /// Replaces the cached profile.
    async fn save(&self, profile: &UserProfile) -> SessionResult<()>;

    /// Removes the cached profile. Clearing an empty store succeeds.
    async fn clear(&self) -> SessionResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),

    /// Stored data could not be decoded or encoded.
    #[error("session data error: {0}")]
    Serialization(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }

    /// Wraps a serialization error.
    pub fn serialization(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Serialization(Arc::new(err))
    }
}
