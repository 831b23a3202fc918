//! Error types for chain identifier validation.

use thiserror::Error;

/// Errors returned while constructing chain identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainDomainError {
    /// The account name is empty after trimming.
    #[error("account name must not be empty")]
    EmptyAccountName,

    /// The account name contains characters outside `[a-z0-9.-]`.
    #[error("invalid account name '{0}', expected lowercase letters, digits, '.' or '-'")]
    InvalidAccountName(String),

    /// The permlink is empty after trimming.
    #[error("permlink must not be empty")]
    EmptyPermlink,
}
