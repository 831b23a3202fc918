//! Submission records derived from replies.

use super::SUBMISSION_HEADING;
use crate::chain::domain::{ActiveVote, ChainDomainError, ChainPost, PostRef};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Review label for a submission.
///
/// Every classified submission starts [`SubmissionStatus::Pending`]. The
/// other labels exist for display only and are never written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Marked approved in the client.
    Approved,
    /// Marked rejected in the client.
    Rejected,
}

/// A reply recognised as work output for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    author: String,
    permlink: String,
    body: String,
    created_at: Option<DateTime<Utc>>,
    votes: Vec<ActiveVote>,
    status: SubmissionStatus,
}

impl Submission {
    /// Builds a pending submission from a reply.
    #[must_use]
    pub fn from_reply(reply: ChainPost) -> Self {
        let created_at = reply.created_at();
        Self {
            author: reply.author,
            permlink: reply.permlink,
            body: reply.body,
            created_at,
            votes: reply.active_votes,
            status: SubmissionStatus::Pending,
        }
    }

    /// Returns the worker's account name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the reply permlink.
    #[must_use]
    pub fn permlink(&self) -> &str {
        &self.permlink
    }

    /// Returns the reply body as written.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the body with the submission heading removed.
    #[must_use]
    pub fn work_text(&self) -> &str {
        self.body
            .strip_prefix(SUBMISSION_HEADING)
            .unwrap_or(&self.body)
            .trim()
    }

    /// Returns the creation time, when the node supplied a parseable one.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the votes cast on the submission.
    #[must_use]
    pub fn votes(&self) -> &[ActiveVote] {
        &self.votes
    }

    /// Returns the review label.
    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Counts distinct voters. This is a display signal, not a trust score.
    #[must_use]
    pub fn voter_count(&self) -> usize {
        self.votes
            .iter()
            .map(|vote| vote.voter.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Returns the address votes on this submission target.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainDomainError`] when the reply carries an invalid
    /// author or permlink.
    pub fn post_ref(&self) -> Result<PostRef, ChainDomainError> {
        PostRef::from_parts(&self.author, &self.permlink)
    }
}
