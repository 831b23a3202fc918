//! Pure construction of signer requests.

use crate::action::domain::{
    BroadcastRequest, CommentOperation, KeyType, Operation, PublishTaskRequest, ReplyRequest,
    VoteRequest,
};
use crate::chain::domain::{AccountName, PostRef};
use crate::comment::{SUBMISSION_HEADING, SUBMISSION_TYPE};
use crate::config::MarketplaceConfig;
use crate::task::{
    codec::{TaskCodec, TaskCodecError},
    domain::{TaskDomainError, TaskDraft},
};
use mockable::Clock;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Closing line appended to every submission body.
pub const SUBMISSION_FOOTER: &str = "---\n*Submitted via [DataComb](https://datacomb.app)*";

const SUBMISSION_PARENT_CHARS: usize = 50;
const REPLY_PARENT_CHARS: usize = 20;
const REPLY_OPTIONS: &str = "{}";

/// Errors raised while composing a request.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The task draft failed validation.
    #[error(transparent)]
    InvalidDraft(#[from] TaskDomainError),

    /// The task could not be encoded into a post.
    #[error(transparent)]
    Encode(#[from] TaskCodecError),

    /// Reply metadata could not be serialized.
    #[error("failed to serialize reply metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ReplyMetadata<'a> {
    app: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    format: &'static str,
}

/// Builds the four outbound request shapes.
///
/// Construction performs no I/O. Timestamps in generated permlinks come from
/// the injected clock.
#[derive(Clone)]
pub struct ActionComposer<C>
where
    C: Clock + Send + Sync,
{
    codec: TaskCodec,
    parent_permlink: String,
    app_identifier: String,
    clock: Arc<C>,
}

impl<C> ActionComposer<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a composer for the configured marketplace.
    #[must_use]
    pub fn new(config: &MarketplaceConfig, clock: Arc<C>) -> Self {
        Self {
            codec: TaskCodec::from_config(config),
            parent_permlink: config.parent_permlink.clone(),
            app_identifier: config.app_identifier.clone(),
            clock,
        }
    }

    /// Builds a task publication owned by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidDraft`] when the draft breaks a field
    /// limit, or [`ComposeError::Encode`] when encoding fails.
    pub fn compose_publish(
        &self,
        draft: TaskDraft,
        requester: &AccountName,
        rng: &mut impl Rng,
    ) -> Result<PublishTaskRequest, ComposeError> {
        draft.validate()?;
        let record = self
            .codec
            .draft_record(draft, requester, self.clock.as_ref(), rng);
        let encoded = self.codec.encode(&record)?;
        let operation = CommentOperation {
            parent_author: String::new(),
            parent_permlink: self.parent_permlink.clone(),
            author: requester.to_string(),
            permlink: encoded.permlink,
            title: encoded.title,
            body: encoded.body,
            json_metadata: encoded.json_metadata,
        };

        Ok(PublishTaskRequest {
            broadcast: BroadcastRequest {
                account: requester.clone(),
                operations: vec![Operation::Comment(operation)],
                key_type: KeyType::Posting,
            },
            record: encoded.record,
        })
    }

    /// Builds a work submission replying to `task`.
    ///
    /// The permlink is `re-<first 50 chars of the task permlink>-<millis>`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Metadata`] when metadata serialization fails.
    pub fn compose_submission(
        &self,
        worker: &AccountName,
        task: &PostRef,
        work: &str,
    ) -> Result<ReplyRequest, ComposeError> {
        let parent_permlink = task.permlink().as_str();
        let permlink = format!(
            "re-{}-{}",
            leading_chars(parent_permlink, SUBMISSION_PARENT_CHARS),
            self.millis()
        );
        let json_metadata = serde_json::to_string(&ReplyMetadata {
            app: &self.app_identifier,
            kind: Some(SUBMISSION_TYPE),
            format: "markdown",
        })?;

        Ok(ReplyRequest {
            author: worker.clone(),
            title: String::new(),
            body: format!("{SUBMISSION_HEADING}\n\n{work}\n\n{SUBMISSION_FOOTER}"),
            parent_author: task.author().to_string(),
            parent_permlink: parent_permlink.to_owned(),
            json_metadata,
            permlink,
            comment_options: String::new(),
        })
    }

    /// Builds a vote on `target`. Positive weights approve, negative reject.
    #[must_use]
    #[expect(clippy::unused_self, reason = "all four verbs hang off the composer")]
    pub fn compose_vote(&self, voter: &AccountName, target: &PostRef, weight: i32) -> VoteRequest {
        VoteRequest {
            voter: voter.clone(),
            author: target.author().to_string(),
            permlink: target.permlink().to_string(),
            weight,
        }
    }

    /// Builds a discussion reply under `parent`.
    ///
    /// The permlink is
    /// `re-<parent author>-<first 20 chars of the parent permlink>-<millis>`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Metadata`] when metadata serialization fails.
    pub fn compose_discussion_reply(
        &self,
        author: &AccountName,
        parent: &PostRef,
        body: impl Into<String>,
    ) -> Result<ReplyRequest, ComposeError> {
        let parent_permlink = parent.permlink().as_str();
        let permlink = format!(
            "re-{}-{}-{}",
            parent.author(),
            leading_chars(parent_permlink, REPLY_PARENT_CHARS),
            self.millis()
        );
        let json_metadata = serde_json::to_string(&ReplyMetadata {
            app: &self.app_identifier,
            kind: None,
            format: "markdown",
        })?;

        Ok(ReplyRequest {
            author: author.clone(),
            title: String::new(),
            body: body.into(),
            parent_author: parent.author().to_string(),
            parent_permlink: parent_permlink.to_owned(),
            json_metadata,
            permlink,
            comment_options: REPLY_OPTIONS.to_owned(),
        })
    }

    fn millis(&self) -> i64 {
        self.clock.utc().timestamp_millis()
    }
}

fn leading_chars(value: &str, count: usize) -> String {
    value.chars().take(count).collect()
}
