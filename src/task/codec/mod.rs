//! Task codec.
//!
//! A task record is written into its post twice: once in the JSON metadata
//! under [`METADATA_TASK_KEY`], and once in the body between
//! [`MARKER_START`] and [`MARKER_END`]. Both copies carry the same bytes.
//! Metadata is sometimes stripped depending on which node answers, while
//! the body always comes back, so either copy alone recovers the record.
//!
//! Decoding tries [`DecodeStrategy::ORDERED`] and falls back to a record
//! synthesized from the raw post fields, so it always yields a record.

mod decode;
mod encode;

pub use decode::{DecodeSource, DecodeStrategy};
#[cfg(test)]
pub(crate) use decode::MAX_MARKER_CANDIDATES;
pub use encode::EncodedTask;

use crate::config::{APP_IDENTIFIER, MARKETPLACE_TAG, MarketplaceConfig};
use thiserror::Error;

/// Prefix prepended to task titles on chain.
pub const TITLE_PREFIX: &str = "[DataComb Task] ";

/// Opening token of the body-embedded payload.
pub const MARKER_START: &str = "<!-- DATACOMB_TASK_DATA:";

/// Closing token of the body-embedded payload.
pub const MARKER_END: &str = ":DATACOMB_TASK_DATA -->";

/// Metadata key holding the embedded payload.
pub const METADATA_TASK_KEY: &str = "task";

/// Errors raised while encoding a task post.
#[derive(Debug, Error)]
pub enum TaskCodecError {
    /// The record has no permlink to publish under.
    #[error("task {0} has no permlink")]
    MissingPermlink(String),

    /// The record could not be serialized.
    #[error("failed to serialize task record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The markdown body template failed to render.
    #[error("failed to render task body: {0}")]
    Template(String),
}

/// Encodes task records into posts and decodes them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCodec {
    tag: String,
    app_identifier: String,
}

impl Default for TaskCodec {
    fn default() -> Self {
        Self::new(MARKETPLACE_TAG, APP_IDENTIFIER)
    }
}

impl TaskCodec {
    /// Creates a codec writing `tag` first in every tag list and
    /// `app_identifier` into metadata.
    #[must_use]
    pub fn new(tag: impl Into<String>, app_identifier: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            app_identifier: app_identifier.into(),
        }
    }

    /// Creates a codec from marketplace configuration.
    #[must_use]
    pub fn from_config(config: &MarketplaceConfig) -> Self {
        Self::new(config.tag.clone(), config.app_identifier.clone())
    }

    /// Returns the marketplace tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the application identifier.
    #[must_use]
    pub fn app_identifier(&self) -> &str {
        &self.app_identifier
    }
}
