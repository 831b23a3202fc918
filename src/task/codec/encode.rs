//! Encoding task records into post title, body and metadata.

use super::{MARKER_END, MARKER_START, TITLE_PREFIX, TaskCodec, TaskCodecError};
use crate::chain::domain::AccountName;
use crate::task::domain::{TaskDraft, TaskRecord};
use chrono::{DateTime, Utc};
use minijinja::Environment;
use mockable::Clock;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, value::RawValue};

const SUFFIX_LENGTH: usize = 9;

const BODY_TEMPLATE: &str = "# {{ title }}

{{ description }}

## Instructions

{{ instructions }}

---

**Category:** {{ category }}  
**Data Type:** {{ data_type }}  
**Reward:** {{ reward }}  
**Max Submissions:** {{ max_submissions }}  
**Required Reputation:** {{ required_reputation }}  
{% if deadline %}**Deadline:** {{ deadline }}{% endif %}

---

*This is a DataComb task. Complete it on [DataComb](https://datacomb.app) to earn rewards.*";

const NO_INSTRUCTIONS: &str = "No specific instructions provided.";

/// A task record rendered into the parts of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTask {
    /// The record that was encoded.
    pub record: TaskRecord,
    /// Post permlink.
    pub permlink: String,
    /// Post title, prefixed with [`TITLE_PREFIX`].
    pub title: String,
    /// Markdown body ending with the marker-delimited payload.
    pub body: String,
    /// JSON metadata carrying tags, app identifier and the payload.
    pub json_metadata: String,
}

#[derive(Serialize)]
struct TaskPostMetadata<'a> {
    tags: Vec<String>,
    app: &'a str,
    format: &'static str,
    task: Box<RawValue>,
}

impl TaskCodec {
    /// Creates a publishable record from a draft.
    ///
    /// The permlink takes the form `datacomb-task-<millis>-<suffix>` and the
    /// nonce `task-<millis>-<suffix>`, each suffix nine random base-36
    /// characters. The creation time is truncated to whole milliseconds so
    /// it survives the wire format unchanged.
    #[must_use]
    pub fn draft_record(
        &self,
        draft: TaskDraft,
        requester: &AccountName,
        clock: &impl Clock,
        rng: &mut impl Rng,
    ) -> TaskRecord {
        let created_at = truncate_to_millis(clock.utc());
        let millis = created_at.timestamp_millis();
        let permlink = format!("datacomb-task-{millis}-{}", random_suffix(rng));
        let id = format!("task-{millis}-{}", random_suffix(rng));
        draft.into_record(id, requester.to_string(), permlink, created_at)
    }

    /// Renders a record into post title, body and metadata.
    ///
    /// The payload is serialized once and the same bytes are placed in the
    /// body marker and under the metadata task key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCodecError::MissingPermlink`] for an unpublished record,
    /// or a serialization or template error.
    pub fn encode(&self, record: &TaskRecord) -> Result<EncodedTask, TaskCodecError> {
        let permlink = record
            .permlink
            .clone()
            .ok_or_else(|| TaskCodecError::MissingPermlink(record.id.clone()))?;
        let payload = serde_json::to_string(record)?;
        let body = render_body(record, &payload)?;
        let json_metadata = self.render_metadata(record, payload)?;

        Ok(EncodedTask {
            record: record.clone(),
            permlink,
            title: format!("{TITLE_PREFIX}{}", record.title),
            body,
            json_metadata,
        })
    }

    fn render_metadata(
        &self,
        record: &TaskRecord,
        payload: String,
    ) -> Result<String, TaskCodecError> {
        let metadata = TaskPostMetadata {
            tags: vec![
                self.tag.clone(),
                "datacomb".to_owned(),
                "hive".to_owned(),
                "ai".to_owned(),
                category_slug(&record.category),
            ],
            app: &self.app_identifier,
            format: "markdown",
            task: RawValue::from_string(payload)?,
        };
        Ok(serde_json::to_string(&metadata)?)
    }
}

fn render_body(record: &TaskRecord, payload: &str) -> Result<String, TaskCodecError> {
    let context = json!({
        "title": record.title,
        "description": record.description,
        "instructions": record.instructions.as_deref().unwrap_or(NO_INSTRUCTIONS),
        "category": record.category,
        "data_type": record.data_type_or_default(),
        "reward": record.reward,
        "max_submissions": record.max_submissions,
        "required_reputation": record.required_reputation,
        "deadline": record.deadline,
    });
    let rendered = Environment::new()
        .render_str(BODY_TEMPLATE, context)
        .map_err(|error| TaskCodecError::Template(error.to_string()))?;
    Ok(format!("{rendered}\n\n{MARKER_START}{payload}{MARKER_END}\n"))
}

/// Lowercases the category and joins its words with `-`.
pub(crate) fn category_slug(category: &str) -> String {
    category
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn random_suffix(rng: &mut impl Rng) -> String {
    (0..SUFFIX_LENGTH)
        .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect()
}

fn truncate_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or(timestamp)
}
