//! Loading a single task together with its replies.

use crate::chain::{
    domain::{ChainPost, PostRef},
    ports::{ChainStore, ChainStoreError},
};
use crate::comment::{ClassifiedReplies, classify_replies};
use crate::task::{codec::TaskCodec, domain::TaskRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while loading task details.
#[derive(Debug, Error)]
pub enum TaskDetailsError {
    /// The upstream query failed.
    #[error(transparent)]
    Store(#[from] ChainStoreError),
}

/// A task post, its decoded record and its classified replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The decoded task record.
    pub task: TaskRecord,
    /// The post the record was decoded from.
    pub post: ChainPost,
    /// Direct replies split into submissions and discussion.
    pub replies: ClassifiedReplies,
}

/// Loads one task and its replies.
#[derive(Clone)]
pub struct TaskDetailsService<S>
where
    S: ChainStore,
{
    store: Arc<S>,
    codec: TaskCodec,
}

impl<S> TaskDetailsService<S>
where
    S: ChainStore,
{
    /// Creates a details service.
    #[must_use]
    pub const fn new(store: Arc<S>, codec: TaskCodec) -> Self {
        Self { store, codec }
    }

    /// Loads the task at `target`.
    ///
    /// Returns `Ok(None)` when no post exists at the address.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDetailsError::Store`] when either upstream query fails.
    pub async fn load(&self, target: &PostRef) -> Result<Option<TaskDetails>, TaskDetailsError> {
        let Some(post) = self.store.get_content(target).await? else {
            debug!(post = %target, "task post not found");
            return Ok(None);
        };
        let raw_replies = self.store.get_content_replies(target).await?;
        let task = self.codec.decode(&post);
        let replies = classify_replies(raw_replies);

        debug!(
            post = %target,
            submissions = replies.submissions.len(),
            discussion = replies.discussion.len(),
            "loaded task details"
        );
        Ok(Some(TaskDetails {
            task,
            post,
            replies,
        }))
    }
}
