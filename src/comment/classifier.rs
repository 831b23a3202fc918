//! Submission versus discussion partitioning.

use super::{SUBMISSION_HEADING, SUBMISSION_TYPE, Submission};
use crate::chain::domain::ChainPost;
use serde_json::Value;

/// Replies split into work submissions and general discussion, each in the
/// order the store returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedReplies {
    /// Replies recognised as work output.
    pub submissions: Vec<Submission>,
    /// Everything else.
    pub discussion: Vec<ChainPost>,
}

/// Returns `true` when a reply carries either submission signal.
#[must_use]
pub fn is_submission(reply: &ChainPost) -> bool {
    reply.body.starts_with(SUBMISSION_HEADING) || has_submission_marker(reply)
}

/// Partitions the direct replies of a task post.
#[must_use]
pub fn classify_replies(replies: Vec<ChainPost>) -> ClassifiedReplies {
    let (submissions, discussion): (Vec<ChainPost>, Vec<ChainPost>) =
        replies.into_iter().partition(is_submission);
    ClassifiedReplies {
        submissions: submissions.into_iter().map(Submission::from_reply).collect(),
        discussion,
    }
}

fn has_submission_marker(reply: &ChainPost) -> bool {
    reply
        .metadata()
        .and_then(|metadata| metadata.get("type").and_then(Value::as_str).map(str::to_owned))
        .is_some_and(|kind| kind == SUBMISSION_TYPE)
}
