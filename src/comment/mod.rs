//! Classification of the replies beneath a task post.
//!
//! Upstream nodes carry no schema for "work" versus "chat", so replies are
//! split with a two-signal heuristic: a `type: submission` metadata marker
//! or a body that opens with [`SUBMISSION_HEADING`]. Replies written before
//! the convention existed, or through another client, read as discussion.
//! Either signal can be forged. The rule is kept as-is because changing it
//! would reclassify the whole history.

mod classifier;
mod submission;

pub use classifier::{ClassifiedReplies, classify_replies, is_submission};
pub use submission::{Submission, SubmissionStatus};

/// Heading that opens every submission body written by this crate.
pub const SUBMISSION_HEADING: &str = "## Work Submission";

/// Metadata `type` value marking a submission.
pub const SUBMISSION_TYPE: &str = "submission";

#[cfg(test)]
mod tests;
