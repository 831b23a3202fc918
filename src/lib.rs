//! DataComb: a task marketplace kept entirely in social-chain posts.
//!
//! There is no backend. A task is a post under the marketplace tag with its
//! structured record embedded twice, once in the post metadata and once in
//! a marker comment in the body. Work submissions and discussion are replies
//! beneath it, and approvals are votes on those replies. This crate encodes
//! and recovers those records, classifies replies, shapes the writes a
//! signer broadcasts, and reads everything back through an injectable store
//! client.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON-RPC,
//!   files)
//!
//! # Modules
//!
//! - [`chain`]: Raw chain records and the store port
//! - [`task`]: Task records, the post codec, discovery and task details
//! - [`comment`]: Submission versus discussion classification
//! - [`action`]: Outbound request shapes, the signer port and dispatch
//! - [`account`]: Reputation, profiles and the login session
//! - [`config`]: Marketplace configuration
//! - [`messages`]: User-facing status messages

pub mod account;
pub mod action;
pub mod chain;
pub mod comment;
pub mod config;
pub mod messages;
pub mod task;

#[cfg(test)]
mod test_support;
