//! Task record, status and the requester-supplied draft.

use super::{ParseTaskStatusError, TaskDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;

/// Submission cap assumed when a record carries none or an invalid one.
pub const DEFAULT_MAX_SUBMISSIONS: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

/// Reputation tier assumed when a record carries none.
pub const DEFAULT_REQUIRED_REPUTATION: &str = "bronze";

/// Data type shown when a record carries none.
pub const DEFAULT_DATA_TYPE: &str = "Mixed";

/// Image used when a requester supplies none.
pub const DEFAULT_TASK_IMAGE: &str =
    "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&h=600&fit=crop";

/// Longest accepted task title, in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Longest accepted task description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Longest accepted instruction text, in characters.
pub const MAX_INSTRUCTIONS_LENGTH: usize = 2000;

/// Advisory task status.
///
/// Set once at publication. Nothing on the chain enforces or updates it, so
/// readers treat it as a hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Accepting submissions.
    #[default]
    Open,
    /// Work is under way.
    InProgress,
    /// No further submissions expected.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical unit of marketplace state, embedded in task posts.
///
/// Field names follow the embedded wire format. Once published,
/// `(requester, permlink)` is the durable identity; `id` is a client nonce
/// that only matters before publication. `reward`, `max_submissions` and
/// `required_reputation` are decorative: nothing enforces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Client-assigned nonce.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Optional worker instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Free-form reward, for example `5 HIVE`.
    #[serde(default)]
    pub reward: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: String,
    /// Requester account name.
    pub requester: String,
    /// Advisory status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Task category, for example `Image Labeling`.
    #[serde(default)]
    pub category: String,
    /// Optional data type tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Optional deadline date as entered by the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Submission cap; absent or invalid values read as 100. A zero cap is
    /// unrepresentable, so every record survives an encode/decode cycle.
    #[serde(
        default = "default_max_submissions",
        deserialize_with = "deserialize_max_submissions"
    )]
    pub max_submissions: NonZeroU32,
    /// Required reputation tier; absent values read as `bronze`.
    #[serde(default = "default_required_reputation")]
    pub required_reputation: String,
    /// Creation time, carried as epoch milliseconds.
    #[serde(rename = "created_at", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Chain permlink once published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permlink: Option<String>,
}

impl TaskRecord {
    /// Returns the key callers deduplicate on: `(requester, permlink)`, or
    /// `(requester, id)` for records that were never published.
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (
            self.requester.as_str(),
            self.permlink.as_deref().unwrap_or(self.id.as_str()),
        )
    }

    /// Returns the data type, or `Mixed` when none was given.
    #[must_use]
    pub fn data_type_or_default(&self) -> &str {
        self.data_type.as_deref().unwrap_or(DEFAULT_DATA_TYPE)
    }
}

/// Keeps the first record for each [`TaskRecord::identity`], preserving
/// order.
///
/// Discovery never deduplicates; callers that rely on identity uniqueness
/// run results through this.
#[must_use]
pub fn dedup_by_identity(records: Vec<TaskRecord>) -> Vec<TaskRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| {
            let (requester, key) = record.identity();
            seen.insert((requester.to_owned(), key.to_owned()))
        })
        .collect()
}

const fn default_max_submissions() -> NonZeroU32 {
    DEFAULT_MAX_SUBMISSIONS
}

fn default_required_reputation() -> String {
    DEFAULT_REQUIRED_REPUTATION.to_owned()
}

/// Accepts positive integers and numeric strings; anything else reads as
/// the default cap.
fn deserialize_max_submissions<'de, D>(deserializer: D) -> Result<NonZeroU32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(parsed
        .and_then(|count| u32::try_from(count).ok())
        .and_then(NonZeroU32::new)
        .unwrap_or(DEFAULT_MAX_SUBMISSIONS))
}

/// Requester-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    instructions: Option<String>,
    reward: String,
    image: Option<String>,
    category: String,
    data_type: Option<String>,
    deadline: Option<String>,
    max_submissions: Option<u32>,
    required_reputation: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        reward: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            instructions: None,
            reward: reward.into(),
            image: None,
            category: category.into(),
            data_type: None,
            deadline: None,
            max_submissions: None,
            required_reputation: None,
        }
    }

    /// Sets worker instructions. Blank text is ignored.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = non_blank(instructions.into());
        self
    }

    /// Sets the cover image URL. Blank text is ignored.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = non_blank(image.into());
        self
    }

    /// Sets the data type tag. Blank text is ignored.
    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = non_blank(data_type.into());
        self
    }

    /// Sets the deadline. Blank text is ignored.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = non_blank(deadline.into());
        self
    }

    /// Sets the submission cap. Zero falls back to the default.
    #[must_use]
    pub const fn with_max_submissions(mut self, max_submissions: u32) -> Self {
        self.max_submissions = Some(max_submissions);
        self
    }

    /// Sets the required reputation tier. Blank text is ignored.
    #[must_use]
    pub fn with_required_reputation(mut self, tier: impl Into<String>) -> Self {
        self.required_reputation = non_blank(tier.into());
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Checks the draft against the publication limits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title, or a
    /// `*TooLong` variant when a text field exceeds its limit.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        check_length(&self.title, MAX_TITLE_LENGTH, TaskDomainError::TitleTooLong)?;
        check_length(
            &self.description,
            MAX_DESCRIPTION_LENGTH,
            TaskDomainError::DescriptionTooLong,
        )?;
        if let Some(instructions) = &self.instructions {
            check_length(
                instructions,
                MAX_INSTRUCTIONS_LENGTH,
                TaskDomainError::InstructionsTooLong,
            )?;
        }
        Ok(())
    }

    /// Turns the draft into a record owned by `requester`.
    ///
    /// Defaults are applied for the image, submission cap and reputation
    /// tier. The record starts [`TaskStatus::Open`].
    #[must_use]
    pub fn into_record(
        self,
        id: String,
        requester: String,
        permlink: String,
        created_at: DateTime<Utc>,
    ) -> TaskRecord {
        TaskRecord {
            id,
            title: self.title.trim().to_owned(),
            description: self.description,
            instructions: self.instructions,
            reward: self.reward,
            image: self
                .image
                .unwrap_or_else(|| DEFAULT_TASK_IMAGE.to_owned()),
            requester,
            status: TaskStatus::Open,
            category: self.category,
            data_type: self.data_type,
            deadline: self.deadline,
            max_submissions: self
                .max_submissions
                .and_then(NonZeroU32::new)
                .unwrap_or(DEFAULT_MAX_SUBMISSIONS),
            required_reputation: self
                .required_reputation
                .unwrap_or_else(default_required_reputation),
            created_at,
            permlink: Some(permlink),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

fn check_length(
    value: &str,
    limit: usize,
    error: fn(usize) -> TaskDomainError,
) -> Result<(), TaskDomainError> {
    let length = value.chars().count();
    if length > limit {
        return Err(error(length));
    }
    Ok(())
}
