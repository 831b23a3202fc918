//! Profile lookup.

use crate::account::domain::UserProfile;
use crate::chain::{
    domain::AccountName,
    ports::{ChainStore, ChainStoreError},
};
use thiserror::Error;

/// Errors returned while fetching a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The store has no such account.
    #[error("account not found: {0}")]
    AccountNotFound(AccountName),

    /// The upstream query failed.
    #[error(transparent)]
    Store(#[from] ChainStoreError),
}

/// Fetches an account and converts it into a profile.
///
/// Malformed posting metadata degrades to empty metadata.
///
/// # Errors
///
/// Returns [`ProfileError::AccountNotFound`] when the account does not
/// exist, or [`ProfileError::Store`] when the query fails.
pub async fn fetch_profile<S>(store: &S, name: &AccountName) -> Result<UserProfile, ProfileError>
where
    S: ChainStore + ?Sized,
{
    let account = store
        .get_account(name)
        .await?
        .ok_or_else(|| ProfileError::AccountNotFound(name.clone()))?;
    Ok(UserProfile::from_account(account))
}
