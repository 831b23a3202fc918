//! In-memory chain store for tests and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::chain::{
    domain::{AccountName, ActiveVote, ChainAccount, ChainPost, PostRef},
    ports::{ChainStore, ChainStoreError, ChainStoreResult, DiscussionQuery},
};

/// Thread-safe in-memory chain store.
///
/// Posts are kept in publication order; discussion queries return them
/// newest first, mirroring the node's `created` ordering. The store can be
/// switched into an unavailable mode to exercise transport failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChainStore {
    state: Arc<RwLock<InMemoryChainState>>,
}

#[derive(Debug, Default)]
struct InMemoryChainState {
    accounts: HashMap<String, ChainAccount>,
    posts: Vec<ChainPost>,
    outage: Option<String>,
}

impl InMemoryChainStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account record.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when lock acquisition fails.
    pub fn insert_account(&self, account: ChainAccount) -> ChainStoreResult<()> {
        let mut state = self.write()?;
        state.accounts.insert(account.name.clone(), account);
        Ok(())
    }

    /// Appends a post or comment, making it the most recent entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when lock acquisition fails.
    pub fn publish(&self, post: ChainPost) -> ChainStoreResult<()> {
        let mut state = self.write()?;
        state.posts.push(post);
        Ok(())
    }

    /// Records a vote on an existing post or reply.
    ///
    /// A later vote by the same voter replaces the earlier one. Returns
    /// `false` when no post exists at `post_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when lock acquisition fails.
    pub fn record_vote(&self, post_ref: &PostRef, vote: ActiveVote) -> ChainStoreResult<bool> {
        let mut state = self.write()?;
        let target = state.posts.iter_mut().find(|post| {
            matches_ref(post, post_ref.author().as_str(), post_ref.permlink().as_str())
        });
        let Some(post) = target else {
            return Ok(false);
        };
        post.active_votes.retain(|existing| existing.voter != vote.voter);
        post.active_votes.push(vote);
        Ok(true)
    }

    /// Makes every subsequent read fail with the given reason until
    /// [`Self::restore`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when lock acquisition fails.
    pub fn simulate_outage(&self, reason: impl Into<String>) -> ChainStoreResult<()> {
        let mut state = self.write()?;
        state.outage = Some(reason.into());
        Ok(())
    }

    /// Ends a simulated outage.
    ///
    /// # Errors
    ///
    /// Returns [`ChainStoreError::Unavailable`] when lock acquisition fails.
    pub fn restore(&self) -> ChainStoreResult<()> {
        let mut state = self.write()?;
        state.outage = None;
        Ok(())
    }

    fn read(&self) -> ChainStoreResult<RwLockReadGuard<'_, InMemoryChainState>> {
        let state = self
            .state
            .read()
            .map_err(|err| ChainStoreError::unavailable(std::io::Error::other(err.to_string())))?;
        if let Some(reason) = &state.outage {
            return Err(ChainStoreError::unavailable(std::io::Error::other(
                reason.clone(),
            )));
        }
        Ok(state)
    }

    fn write(&self) -> ChainStoreResult<RwLockWriteGuard<'_, InMemoryChainState>> {
        self.state
            .write()
            .map_err(|err| ChainStoreError::unavailable(std::io::Error::other(err.to_string())))
    }
}

/// Returns `true` when a top-level post is filed under `tag`, either as its
/// category or anywhere in its metadata tag list.
fn is_tagged(post: &ChainPost, tag: &str) -> bool {
    if post.parent_permlink == tag {
        return true;
    }
    post.metadata()
        .and_then(|metadata| metadata.get("tags").cloned())
        .and_then(|tags| tags.as_array().cloned())
        .is_some_and(|tags| tags.iter().any(|entry| entry.as_str() == Some(tag)))
}

fn matches_ref(post: &ChainPost, author: &str, permlink: &str) -> bool {
    post.author == author && post.permlink == permlink
}

#[async_trait]
impl ChainStore for InMemoryChainStore {
    async fn get_account(&self, name: &AccountName) -> ChainStoreResult<Option<ChainAccount>> {
        let state = self.read()?;
        Ok(state.accounts.get(name.as_str()).cloned())
    }

    async fn get_discussions_by_created(
        &self,
        query: &DiscussionQuery,
    ) -> ChainStoreResult<Vec<ChainPost>> {
        let state = self.read()?;
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(state
            .posts
            .iter()
            .rev()
            .filter(|post| post.parent_author.is_empty() && is_tagged(post, &query.tag))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_content(&self, post_ref: &PostRef) -> ChainStoreResult<Option<ChainPost>> {
        let state = self.read()?;
        Ok(state
            .posts
            .iter()
            .find(|post| {
                matches_ref(post, post_ref.author().as_str(), post_ref.permlink().as_str())
            })
            .cloned())
    }

    async fn get_content_replies(&self, post_ref: &PostRef) -> ChainStoreResult<Vec<ChainPost>> {
        let state = self.read()?;
        Ok(state
            .posts
            .iter()
            .filter(|post| {
                post.parent_author == post_ref.author().as_str()
                    && post.parent_permlink == post_ref.permlink().as_str()
            })
            .cloned()
            .collect())
    }
}
