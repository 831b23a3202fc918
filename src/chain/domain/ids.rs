//! Identifier types for chain accounts and posts.

use super::ChainDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain account name, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Creates a validated account name.
    ///
    /// Surrounding whitespace and a leading `@` are stripped and the value is
    /// lowercased before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ChainDomainError::EmptyAccountName`] for blank input or
    /// [`ChainDomainError::InvalidAccountName`] when the name contains
    /// characters the chain does not allow.
    pub fn new(value: impl Into<String>) -> Result<Self, ChainDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_start_matches('@').to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ChainDomainError::EmptyAccountName);
        }
        let is_valid = normalized
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' || ch == '-');
        if !is_valid {
            return Err(ChainDomainError::InvalidAccountName(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the account name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-author slug identifying a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permlink(String);

impl Permlink {
    /// Creates a validated permlink.
    ///
    /// # Errors
    ///
    /// Returns [`ChainDomainError::EmptyPermlink`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ChainDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChainDomainError::EmptyPermlink);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the permlink as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Permlink {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Permlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable address of a post or comment: `(author, permlink)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    author: AccountName,
    permlink: Permlink,
}

impl PostRef {
    /// Creates a post reference from validated components.
    #[must_use]
    pub const fn new(author: AccountName, permlink: Permlink) -> Self {
        Self { author, permlink }
    }

    /// Creates a post reference from raw values.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainDomainError`] when either component is invalid.
    pub fn from_parts(author: &str, permlink: &str) -> Result<Self, ChainDomainError> {
        Ok(Self::new(AccountName::new(author)?, Permlink::new(permlink)?))
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &AccountName {
        &self.author
    }

    /// Returns the permlink.
    #[must_use]
    pub const fn permlink(&self) -> &Permlink {
        &self.permlink
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}", self.author, self.permlink)
    }
}
