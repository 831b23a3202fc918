//! In-memory signer for tests and offline runs.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::action::{
    domain::{BroadcastRequest, Operation, ReplyRequest, SignMessageRequest, VoteRequest},
    ports::{SignerCapability, SignerError, SignerReceipt, SignerResult},
};
use crate::chain::{
    adapters::InMemoryChainStore,
    domain::{ActiveVote, ChainPost, PostRef},
};

const CHAIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A request the signer received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerCall {
    /// A message signature.
    SignMessage(SignMessageRequest),
    /// An operation broadcast.
    Broadcast(BroadcastRequest),
    /// A vote.
    Vote(VoteRequest),
    /// A post or reply.
    Post(ReplyRequest),
}

/// Signer that records every request and accepts it unless told to fail.
///
/// When built with [`RecordingSigner::mirroring`], accepted writes are
/// applied to an [`InMemoryChainStore`] so reads observe them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSigner {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<SignerCall>,
    failure: Option<SignerError>,
    chain: Option<InMemoryChainStore>,
}

impl RecordingSigner {
    /// Creates a signer that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signer that applies accepted writes to `chain`.
    #[must_use]
    pub fn mirroring(chain: InMemoryChainStore) -> Self {
        Self {
            state: Arc::new(RwLock::new(RecordingState {
                chain: Some(chain),
                ..RecordingState::default()
            })),
        }
    }

    /// Makes every subsequent request fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::Transport`] when lock acquisition fails.
    pub fn fail_with(&self, error: SignerError) -> SignerResult<()> {
        self.write()?.failure = Some(error);
        Ok(())
    }

    /// Returns the requests received so far.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::Transport`] when lock acquisition fails.
    pub fn calls(&self) -> SignerResult<Vec<SignerCall>> {
        let state = self
            .state
            .read()
            .map_err(|err| SignerError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.calls.clone())
    }

    fn write(&self) -> SignerResult<RwLockWriteGuard<'_, RecordingState>> {
        self.state
            .write()
            .map_err(|err| SignerError::transport(std::io::Error::other(err.to_string())))
    }

    /// Records `call`, then fails or hands back the mirrored chain.
    fn accept(&self, call: SignerCall) -> SignerResult<Option<InMemoryChainStore>> {
        let mut state = self.write()?;
        state.calls.push(call);
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state.chain.clone())
    }
}

fn chain_timestamp() -> String {
    DefaultClock.utc().format(CHAIN_TIMESTAMP_FORMAT).to_string()
}

fn publish(chain: &InMemoryChainStore, post: ChainPost) -> SignerResult<()> {
    chain.publish(post).map_err(SignerError::transport)
}

#[async_trait]
impl SignerCapability for RecordingSigner {
    async fn sign_message(&self, request: &SignMessageRequest) -> SignerResult<SignerReceipt> {
        self.accept(SignerCall::SignMessage(request.clone()))?;
        Ok(SignerReceipt {
            message: None,
            result: Some(format!("signed:{}", request.account)),
        })
    }

    async fn broadcast(&self, request: &BroadcastRequest) -> SignerResult<SignerReceipt> {
        let Some(chain) = self.accept(SignerCall::Broadcast(request.clone()))? else {
            return Ok(SignerReceipt::default());
        };
        for operation in &request.operations {
            match operation {
                Operation::Comment(comment) => publish(
                    &chain,
                    ChainPost {
                        author: comment.author.clone(),
                        permlink: comment.permlink.clone(),
                        parent_author: comment.parent_author.clone(),
                        parent_permlink: comment.parent_permlink.clone(),
                        title: comment.title.clone(),
                        body: comment.body.clone(),
                        json_metadata: comment.json_metadata.clone(),
                        created: chain_timestamp(),
                        active_votes: Vec::new(),
                    },
                )?,
            }
        }
        Ok(SignerReceipt::default())
    }

    async fn vote(&self, request: &VoteRequest) -> SignerResult<SignerReceipt> {
        let Some(chain) = self.accept(SignerCall::Vote(request.clone()))? else {
            return Ok(SignerReceipt::default());
        };
        let target = PostRef::from_parts(&request.author, &request.permlink)
            .map_err(|err| SignerError::rejected(err.to_string()))?;
        let vote = ActiveVote::new(request.voter.as_str(), request.weight);
        if !chain.record_vote(&target, vote).map_err(SignerError::transport)? {
            return Err(SignerError::rejected(format!("{target} does not exist")));
        }
        Ok(SignerReceipt::default())
    }

    async fn post(&self, request: &ReplyRequest) -> SignerResult<SignerReceipt> {
        let Some(chain) = self.accept(SignerCall::Post(request.clone()))? else {
            return Ok(SignerReceipt::default());
        };
        publish(
            &chain,
            ChainPost {
                author: request.author.to_string(),
                permlink: request.permlink.clone(),
                parent_author: request.parent_author.clone(),
                parent_permlink: request.parent_permlink.clone(),
                title: request.title.clone(),
                body: request.body.clone(),
                json_metadata: request.json_metadata.clone(),
                created: chain_timestamp(),
                active_votes: Vec::new(),
            },
        )?;
        Ok(SignerReceipt::default())
    }
}
