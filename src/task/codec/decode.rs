//! Recovering task records from posts.

use super::{MARKER_END, MARKER_START, METADATA_TASK_KEY, TITLE_PREFIX, TaskCodec};
use crate::chain::domain::ChainPost;
use crate::task::domain::{
    DEFAULT_MAX_SUBMISSIONS, DEFAULT_REQUIRED_REPUTATION, DEFAULT_TASK_IMAGE, TaskRecord,
    TaskStatus,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const EXCERPT_LENGTH: usize = 200;
const SYNTHESIZED_REWARD: &str = "0 HIVE";
const FALLBACK_CATEGORY: &str = "Other";

/// Upper bound on marker spans parsed per post.
pub(crate) const MAX_MARKER_CANDIDATES: usize = 16;

/// Tag-list position holding the category slug written at encode time.
/// Foreign posts rarely follow it, so synthesized categories are a weak
/// signal.
const CATEGORY_TAG_INDEX: usize = 4;

/// Where a decoded record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeSource {
    /// The metadata task key.
    Metadata,
    /// The marker-delimited body payload.
    BodyMarker,
    /// Reconstructed from raw post fields.
    Synthesized,
}

/// A decode strategy that may fail to find a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Parse the metadata and read the task key.
    Metadata,
    /// Scan the body for the marker-delimited payload.
    BodyMarker,
}

impl DecodeStrategy {
    /// Strategies in priority order. Synthesis runs after all of them fail.
    pub const ORDERED: [Self; 2] = [Self::Metadata, Self::BodyMarker];

    /// Attempts to recover a record. Parse failures yield `None`.
    #[must_use]
    pub fn attempt(self, post: &ChainPost) -> Option<TaskRecord> {
        match self {
            Self::Metadata => from_metadata(post),
            Self::BodyMarker => from_body_marker(post),
        }
    }

    /// Returns the source reported for records this strategy recovers.
    #[must_use]
    pub const fn source(self) -> DecodeSource {
        match self {
            Self::Metadata => DecodeSource::Metadata,
            Self::BodyMarker => DecodeSource::BodyMarker,
        }
    }
}

impl TaskCodec {
    /// Decodes a task record from a post. Never fails.
    #[must_use]
    pub fn decode(&self, post: &ChainPost) -> TaskRecord {
        self.decode_with_source(post).0
    }

    /// Decodes a task record and reports which strategy produced it.
    #[must_use]
    pub fn decode_with_source(&self, post: &ChainPost) -> (TaskRecord, DecodeSource) {
        DecodeStrategy::ORDERED
            .iter()
            .find_map(|strategy| {
                strategy
                    .attempt(post)
                    .map(|record| (record, strategy.source()))
            })
            .unwrap_or_else(|| {
                debug!(
                    author = %post.author,
                    permlink = %post.permlink,
                    "no embedded task payload, synthesizing from post fields"
                );
                (synthesize(post), DecodeSource::Synthesized)
            })
    }
}

fn from_metadata(post: &ChainPost) -> Option<TaskRecord> {
    let metadata = post.metadata()?;
    let task = metadata.get(METADATA_TASK_KEY).filter(|task| !task.is_null())?;
    match serde_json::from_value(task.clone()) {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(
                author = %post.author,
                permlink = %post.permlink,
                %error,
                "metadata task payload is malformed"
            );
            None
        }
    }
}

/// Returns the first marker-delimited span that parses as a record.
///
/// Start/end pairings are tried in body order so that marker text quoted
/// inside the description, or inside the payload itself, does not hide the
/// real payload. At most [`MAX_MARKER_CANDIDATES`] spans are parsed.
fn from_body_marker(post: &ChainPost) -> Option<TaskRecord> {
    let mut candidates = marker_spans(&post.body)
        .take(MAX_MARKER_CANDIDATES)
        .peekable();
    let found_marker = candidates.peek().is_some();
    for candidate in candidates {
        if let Ok(record) = serde_json::from_str::<TaskRecord>(candidate) {
            return Some(record);
        }
    }
    if found_marker {
        warn!(
            author = %post.author,
            permlink = %post.permlink,
            "body task marker present but payload is malformed"
        );
    }
    None
}

/// Yields every span between a start marker and a later end marker,
/// ordered by start then end position.
fn marker_spans(body: &str) -> impl Iterator<Item = &str> {
    body.match_indices(MARKER_START)
        .filter_map(move |(start, _)| body.get(start + MARKER_START.len()..))
        .flat_map(|rest| {
            rest.match_indices(MARKER_END)
                .filter_map(move |(end, _)| rest.get(..end))
        })
}

fn synthesize(post: &ChainPost) -> TaskRecord {
    let metadata = post.metadata().unwrap_or_default();
    TaskRecord {
        id: post.permlink.clone(),
        title: post.title.replacen(TITLE_PREFIX, "", 1),
        description: excerpt(&post.body),
        instructions: None,
        reward: SYNTHESIZED_REWARD.to_owned(),
        image: first_image(&metadata).unwrap_or_else(|| DEFAULT_TASK_IMAGE.to_owned()),
        requester: post.author.clone(),
        status: TaskStatus::Open,
        category: category_tag(&metadata).unwrap_or_else(|| FALLBACK_CATEGORY.to_owned()),
        data_type: None,
        deadline: None,
        max_submissions: DEFAULT_MAX_SUBMISSIONS,
        required_reputation: DEFAULT_REQUIRED_REPUTATION.to_owned(),
        created_at: post.created_at().unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        permlink: Some(post.permlink.clone()),
    }
}

fn excerpt(body: &str) -> String {
    let mut text: String = body.chars().take(EXCERPT_LENGTH).collect();
    text.push_str("...");
    text
}

fn first_image(metadata: &Map<String, Value>) -> Option<String> {
    metadata
        .get("image")?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_owned)
}

fn category_tag(metadata: &Map<String, Value>) -> Option<String> {
    metadata
        .get("tags")?
        .as_array()?
        .get(CATEGORY_TAG_INDEX)?
        .as_str()
        .map(str::to_owned)
}
