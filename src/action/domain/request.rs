//! Requests for each signer verb.

use super::Operation;
use crate::chain::domain::AccountName;
use crate::task::domain::TaskRecord;
use serde::Serialize;

/// Vote weight that reads as approval.
pub const APPROVE_WEIGHT: i32 = 10_000;

/// Vote weight that reads as rejection.
pub const REJECT_WEIGHT: i32 = -10_000;

/// Key authority a request is signed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum KeyType {
    /// Social actions: posts, replies and votes.
    #[default]
    Posting,
    /// Financial actions.
    Active,
}

impl KeyType {
    /// Returns the name signers use for the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posting => "Posting",
            Self::Active => "Active",
        }
    }
}

/// Request to sign an arbitrary message, used as a login challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignMessageRequest {
    /// Account whose key signs.
    pub account: AccountName,
    /// Message to sign.
    pub message: String,
    /// Key to sign with.
    pub key_type: KeyType,
}

/// Request to sign and broadcast a list of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRequest {
    /// Account whose key signs.
    pub account: AccountName,
    /// Operations in broadcast order.
    pub operations: Vec<Operation>,
    /// Key to sign with.
    pub key_type: KeyType,
}

/// A task publication: the broadcast plus the record it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTaskRequest {
    /// Broadcast carrying a single `comment` operation.
    pub broadcast: BroadcastRequest,
    /// The record embedded in the post.
    pub record: TaskRecord,
}

impl PublishTaskRequest {
    /// Returns the permlink the task will be published under.
    #[must_use]
    pub fn permlink(&self) -> &str {
        self.record.permlink.as_deref().unwrap_or(self.record.id.as_str())
    }
}

/// Request to publish a reply through the signer's post verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    /// Replying account.
    pub author: AccountName,
    /// Title; empty for replies.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Author of the post being replied to.
    pub parent_author: String,
    /// Permlink of the post being replied to.
    pub parent_permlink: String,
    /// Serialized JSON metadata.
    pub json_metadata: String,
    /// New reply permlink.
    pub permlink: String,
    /// Serialized comment options; may be empty.
    pub comment_options: String,
}

/// Request to vote on a post or reply.
///
/// The weight is not range-checked here; the signer and chain enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRequest {
    /// Voting account.
    pub voter: AccountName,
    /// Author of the target.
    pub author: String,
    /// Permlink of the target.
    pub permlink: String,
    /// Signed weight in basis points.
    pub weight: i32,
}
