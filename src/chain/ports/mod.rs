//! Port contracts for upstream store access.
//!
//! Ports define infrastructure-agnostic interfaces used by the task,
//! comment and account services.

pub mod store;

pub use store::{ChainStore, ChainStoreError, ChainStoreResult, DiscussionQuery};
