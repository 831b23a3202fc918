//! Signer port.

use crate::action::domain::{BroadcastRequest, ReplyRequest, SignMessageRequest, VoteRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

/// Acknowledgement returned by the signer for an accepted request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerReceipt {
    /// Message the signer attached, if any.
    pub message: Option<String>,
    /// Signature or transaction id, if the signer reports one.
    pub result: Option<String>,
}

/// Holder of the user's keys, producing authenticated writes.
///
/// Each verb is a single request/response. Implementations decide how the
/// request reaches the chain; callers never retry.
#[async_trait]
pub trait SignerCapability: Send + Sync {
    /// Signs an arbitrary message.
    async fn sign_message(&self, request: &SignMessageRequest) -> SignerResult<SignerReceipt>;

    /// Signs and broadcasts a list of operations.
    async fn broadcast(&self, request: &BroadcastRequest) -> SignerResult<SignerReceipt>;

    /// Casts a vote.
    async fn vote(&self, request: &VoteRequest) -> SignerResult<SignerReceipt>;

    /// Publishes a post or reply.
    async fn post(&self, request: &ReplyRequest) -> SignerResult<SignerReceipt>;
}

/// Errors returned by signer implementations.
#[derive(Debug, Clone, Error)]
pub enum SignerError {
    /// The signer declined the request, optionally saying why.
    #[error("signer rejected the request: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// The signer could not be reached.
    #[error("signer unavailable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SignerError {
    /// Creates a rejection carrying the signer's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(Some(message.into()))
    }

    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
