//! Posts and comments as returned by chain nodes.

use super::{ChainDomainError, PostRef};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A post or comment exactly as a chain node serves it.
///
/// Top-level posts have an empty `parent_author`; the chain uses the first
/// tag as `parent_permlink`. Absent fields default to empty values so a
/// partially populated node response still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainPost {
    /// Author account name. Empty when the node reports a missing post.
    #[serde(default)]
    pub author: String,
    /// Per-author slug.
    #[serde(default)]
    pub permlink: String,
    /// Parent author; empty for top-level posts.
    #[serde(default)]
    pub parent_author: String,
    /// Parent permlink, or the category tag for top-level posts.
    #[serde(default)]
    pub parent_permlink: String,
    /// Post title; empty for replies.
    #[serde(default)]
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
    /// JSON metadata as an unparsed string.
    #[serde(default)]
    pub json_metadata: String,
    /// Creation timestamp as served, usually without a UTC suffix.
    #[serde(default)]
    pub created: String,
    /// Votes cast on the post.
    #[serde(default)]
    pub active_votes: Vec<ActiveVote>,
}

/// A single vote on a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveVote {
    /// Voting account.
    pub voter: String,
    /// Signed vote weight in basis points; negative values are downvotes.
    #[serde(default)]
    pub percent: i32,
}

impl ActiveVote {
    /// Creates a vote entry.
    #[must_use]
    pub fn new(voter: impl Into<String>, percent: i32) -> Self {
        Self {
            voter: voter.into(),
            percent,
        }
    }
}

impl ChainPost {
    /// Returns `true` when the node answered with its empty placeholder
    /// instead of a post.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.author.is_empty()
    }

    /// Returns the post's `(author, permlink)` address.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainDomainError`] when the post carries an invalid author
    /// or permlink.
    pub fn post_ref(&self) -> Result<PostRef, ChainDomainError> {
        PostRef::from_parts(&self.author, &self.permlink)
    }

    /// Parses the creation timestamp, treating a missing zone suffix as UTC.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_chain_timestamp(&self.created)
    }

    /// Parses `json_metadata` as a JSON object.
    ///
    /// Returns `None` when the metadata is empty, malformed or not an object.
    #[must_use]
    pub fn metadata(&self) -> Option<Map<String, Value>> {
        match serde_json::from_str::<Value>(&self.json_metadata) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

/// Parses a chain timestamp such as `2024-05-01T12:00:00`, appending the UTC
/// designator when the node omitted it.
#[must_use]
pub(crate) fn parse_chain_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.ends_with('Z') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}Z")
    };
    DateTime::parse_from_rfc3339(&normalized)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
