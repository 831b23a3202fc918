//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating a task draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the character limit.
    #[error("task title is {0} characters, limit is 100")]
    TitleTooLong(usize),

    /// The description exceeds the character limit.
    #[error("task description is {0} characters, limit is 500")]
    DescriptionTooLong(usize),

    /// The instructions exceed the character limit.
    #[error("task instructions are {0} characters, limit is 2000")]
    InstructionsTooLong(usize),
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
