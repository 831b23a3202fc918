//! Handing composed requests to the signer.

use super::{ActionComposer, ComposeError};
use crate::action::ports::{SignerCapability, SignerError};
use crate::chain::domain::{AccountName, PostRef};
use crate::messages;
use crate::task::domain::{TaskDraft, TaskRecord};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by action dispatch. Display text is user-facing.
#[derive(Debug, Error)]
pub enum ActionError {
    /// No signer was supplied.
    #[error("{}", messages::SIGNER_NOT_FOUND)]
    SignerUnavailable,

    /// The request could not be composed.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The signer declined. Carries the signer's message, or a fallback.
    #[error("{message}")]
    Rejected {
        /// Message to show the user.
        message: String,
    },

    /// The signer could not be reached.
    #[error("{}", messages::NETWORK_ERROR)]
    Network(#[source] SignerError),
}

/// Result type for action dispatch.
pub type ActionResult<T> = Result<T, ActionError>;

/// Outcome of an accepted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    /// Success message for the user.
    pub message: &'static str,
    /// Extra notice for the user, if any.
    pub notice: Option<&'static str>,
    /// Permlink of the created post, or of the vote target.
    pub permlink: String,
    /// The published record, for task publication.
    pub task: Option<TaskRecord>,
}

impl ActionReceipt {
    fn new(message: &'static str, permlink: impl Into<String>) -> Self {
        Self {
            message,
            notice: None,
            permlink: permlink.into(),
            task: None,
        }
    }
}

/// Composes requests and hands them to the signer, if one is present.
///
/// Every verb fails with [`ActionError::SignerUnavailable`] when no signer
/// was supplied. Nothing is retried and no local state is kept.
#[derive(Clone)]
pub struct ActionService<C>
where
    C: Clock + Send + Sync,
{
    composer: ActionComposer<C>,
    signer: Option<Arc<dyn SignerCapability>>,
}

impl<C> ActionService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a dispatch service.
    #[must_use]
    pub const fn new(
        composer: ActionComposer<C>,
        signer: Option<Arc<dyn SignerCapability>>,
    ) -> Self {
        Self { composer, signer }
    }

    /// Returns `true` when a signer is available.
    #[must_use]
    pub const fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    /// Returns the composer.
    #[must_use]
    pub const fn composer(&self) -> &ActionComposer<C> {
        &self.composer
    }

    /// Publishes a new task post owned by `requester`.
    ///
    /// The receipt carries the published record and a notice that the task
    /// may not be visible to discovery for a while.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when no signer is present, the draft is
    /// invalid, or the signer declines or cannot be reached.
    pub async fn publish_task(
        &self,
        requester: &AccountName,
        draft: TaskDraft,
    ) -> ActionResult<ActionReceipt> {
        let signer = self.signer()?;
        let request = {
            let mut rng = rand::thread_rng();
            self.composer.compose_publish(draft, requester, &mut rng)?
        };
        signer
            .broadcast(&request.broadcast)
            .await
            .map_err(|err| signer_failure(err, messages::TASK_CREATION_FAILED))?;

        info!(requester = %requester, permlink = request.permlink(), "task published");
        Ok(ActionReceipt {
            notice: Some(messages::PROPAGATION_NOTICE),
            task: Some(request.record.clone()),
            ..ActionReceipt::new(messages::TASK_CREATED, request.permlink())
        })
    }

    /// Submits work as a reply to `task`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when no signer is present or the signer
    /// declines or cannot be reached.
    pub async fn submit_work(
        &self,
        worker: &AccountName,
        task: &PostRef,
        work: &str,
    ) -> ActionResult<ActionReceipt> {
        let signer = self.signer()?;
        let request = self.composer.compose_submission(worker, task, work)?;
        signer
            .post(&request)
            .await
            .map_err(|err| signer_failure(err, messages::WORK_SUBMISSION_FAILED))?;

        info!(worker = %worker, task = %task, permlink = %request.permlink, "work submitted");
        Ok(ActionReceipt::new(messages::WORK_SUBMITTED, request.permlink))
    }

    /// Votes on `target` with a signed weight.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when no signer is present or the signer
    /// declines or cannot be reached.
    pub async fn vote(
        &self,
        voter: &AccountName,
        target: &PostRef,
        weight: i32,
    ) -> ActionResult<ActionReceipt> {
        let signer = self.signer()?;
        let request = self.composer.compose_vote(voter, target, weight);
        signer
            .vote(&request)
            .await
            .map_err(|err| signer_failure(err, messages::ACTION_FAILED))?;

        info!(voter = %voter, target = %target, weight, "vote cast");
        Ok(ActionReceipt::new(messages::VOTE_SUCCESS, request.permlink))
    }

    /// Posts a discussion reply under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when no signer is present or the signer
    /// declines or cannot be reached.
    pub async fn reply(
        &self,
        author: &AccountName,
        parent: &PostRef,
        body: &str,
    ) -> ActionResult<ActionReceipt> {
        let signer = self.signer()?;
        let request = self
            .composer
            .compose_discussion_reply(author, parent, body)?;
        signer
            .post(&request)
            .await
            .map_err(|err| signer_failure(err, messages::ACTION_FAILED))?;

        info!(author = %author, parent = %parent, permlink = %request.permlink, "reply posted");
        Ok(ActionReceipt::new(messages::COMMENT_POSTED, request.permlink))
    }

    fn signer(&self) -> ActionResult<&Arc<dyn SignerCapability>> {
        self.signer.as_ref().ok_or(ActionError::SignerUnavailable)
    }
}

/// Maps a signer failure onto a user-facing error.
///
/// A rejection keeps the signer's own message when it sent a non-blank one.
fn signer_failure(error: SignerError, fallback: &str) -> ActionError {
    warn!(%error, "signer request failed");
    match error {
        SignerError::Rejected(message) => ActionError::Rejected {
            message: message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| fallback.to_owned()),
        },
        transport @ SignerError::Transport(_) => ActionError::Network(transport),
    }
}
