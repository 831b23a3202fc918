//! Domain model for marketplace tasks.
//!
//! A task lives on chain as a post; [`TaskRecord`] is the structured form
//! embedded in that post and recovered from it.

mod error;
mod record;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use record::{
    DEFAULT_DATA_TYPE, DEFAULT_MAX_SUBMISSIONS, DEFAULT_REQUIRED_REPUTATION, DEFAULT_TASK_IMAGE,
    MAX_DESCRIPTION_LENGTH, MAX_INSTRUCTIONS_LENGTH, MAX_TITLE_LENGTH, TaskDraft, TaskRecord,
    TaskStatus, dedup_by_identity,
};
