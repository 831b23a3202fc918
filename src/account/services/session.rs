//! Login, logout and the current session.

use super::{ProfileError, fetch_profile};
use crate::account::{
    domain::UserProfile,
    ports::{SessionStore, SessionStoreError},
};
use crate::action::{
    domain::{KeyType, SignMessageRequest},
    ports::{SignerCapability, SignerError},
};
use crate::chain::{
    domain::{AccountName, ChainDomainError},
    ports::ChainStore,
};
use crate::messages;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Prefix of the message signed to prove account ownership.
pub const LOGIN_CHALLENGE_PREFIX: &str = "Login to DataComb - ";

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The username is not a valid account name.
    #[error(transparent)]
    InvalidAccount(#[from] ChainDomainError),

    /// The signer declined the challenge. Carries the signer's message, or
    /// a fallback.
    #[error("{message}")]
    Rejected {
        /// Message to show the user.
        message: String,
    },

    /// The signer could not be reached.
    #[error("{}", messages::NETWORK_ERROR)]
    Signer(#[source] SignerError),

    /// The profile could not be fetched.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Login and session caching.
///
/// With a signer present, login signs a timestamped challenge with the
/// posting key and then caches the on-chain profile. Without one, a
/// simulated demo profile is cached instead so the rest of the client stays
/// usable.
#[derive(Clone)]
pub struct SessionService<S, T, C>
where
    S: ChainStore,
    T: SessionStore,
    C: Clock + Send + Sync,
{
    chain: Arc<S>,
    sessions: Arc<T>,
    signer: Option<Arc<dyn SignerCapability>>,
    clock: Arc<C>,
}

impl<S, T, C> SessionService<S, T, C>
where
    S: ChainStore,
    T: SessionStore,
    C: Clock + Send + Sync,
{
    /// Creates a session service.
    #[must_use]
    pub const fn new(
        chain: Arc<S>,
        sessions: Arc<T>,
        signer: Option<Arc<dyn SignerCapability>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            chain,
            sessions,
            signer,
            clock,
        }
    }

    /// Logs in as `username` and caches the resulting profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the name is invalid, the signer
    /// declines or cannot be reached, the account cannot be fetched, or the
    /// session store fails.
    pub async fn login(&self, username: &str) -> Result<UserProfile, SessionError> {
        let account = AccountName::new(username)?;
        let Some(signer) = &self.signer else {
            warn!(account = %account, "no signer available, using demo profile");
            let profile = UserProfile::demo(account.as_str());
            self.sessions.save(&profile).await?;
            return Ok(profile);
        };

        let challenge = SignMessageRequest {
            account: account.clone(),
            message: format!("{LOGIN_CHALLENGE_PREFIX}{}", self.clock.utc().timestamp_millis()),
            key_type: KeyType::Posting,
        };
        signer
            .sign_message(&challenge)
            .await
            .map_err(login_failure)?;

        let profile = fetch_profile(self.chain.as_ref(), &account).await?;
        self.sessions.save(&profile).await?;
        info!(account = %account, reputation = profile.reputation, "logged in");
        Ok(profile)
    }

    /// Clears the cached profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the session store fails.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.sessions.clear().await?;
        info!("logged out");
        Ok(())
    }

    /// Returns the cached profile, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the session store fails.
    pub async fn current(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.sessions.load().await?)
    }
}

fn login_failure(error: SignerError) -> SessionError {
    warn!(%error, "login challenge failed");
    match error {
        SignerError::Rejected(message) => SessionError::Rejected {
            message: message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| messages::LOGIN_FAILED.to_owned()),
        },
        transport @ SignerError::Transport(_) => SessionError::Signer(transport),
    }
}
