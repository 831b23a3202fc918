//! In-memory session store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::account::{
    domain::UserProfile,
    ports::{SessionResult, SessionStore, SessionStoreError},
};

/// Thread-safe in-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> SessionResult<Option<UserProfile>> {
        let profile = self.profile.read().map_err(lock_error)?;
        Ok(profile.clone())
    }

    async fn save(&self, profile: &UserProfile) -> SessionResult<()> {
        let mut slot = self.profile.write().map_err(lock_error)?;
        *slot = Some(profile.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        let mut slot = self.profile.write().map_err(lock_error)?;
        *slot = None;
        Ok(())
    }
}
