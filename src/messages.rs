//! User-facing status messages.
//!
//! Failures from the signer are shown verbatim when it supplies a message;
//! these constants are the fallbacks and the success confirmations.

/// No signer is available to authorize writes.
pub const SIGNER_NOT_FOUND: &str = "Hive Keychain not found. Please install the browser extension.";

/// Login challenge was not signed.
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Task publication was rejected.
pub const TASK_CREATION_FAILED: &str =
    "Failed to create task. Please check your inputs and try again.";

/// Work submission was rejected.
pub const WORK_SUBMISSION_FAILED: &str = "Failed to submit work. Please try again.";

/// Vote or discussion reply was rejected without a signer message.
pub const ACTION_FAILED: &str = "Request failed. Please try again.";

/// The store or signer could not be reached.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// Login succeeded.
pub const LOGIN_SUCCESS: &str = "Login successful!";

/// Task publication succeeded.
pub const TASK_CREATED: &str = "Task created successfully!";

/// Work submission succeeded.
pub const WORK_SUBMITTED: &str = "Work submitted successfully!";

/// Discussion reply succeeded.
pub const COMMENT_POSTED: &str = "Comment posted successfully!";

/// Vote succeeded.
pub const VOTE_SUCCESS: &str = "Vote recorded successfully!";

/// Shown after publication: nodes take a while to serve new posts.
pub const PROPAGATION_NOTICE: &str =
    "Your task may take 1-2 minutes to appear in the marketplace while the network propagates it.";
