//! Display reputation and the tiers built on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Display score of an account with zero raw reputation.
pub const NEUTRAL_REPUTATION: i64 = 25;

/// Converts a raw logarithmic reputation into the display scale.
///
/// Zero maps to 25. Otherwise the score is
/// `floor(25 ± 9 * max(log10(|raw|) - 9, 0))`, taking the sign of `raw`.
/// Very negative accounts score below zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "the display scale is defined in floating point and floored"
)]
pub fn reputation_transform(raw: i64) -> i64 {
    if raw == 0 {
        return NEUTRAL_REPUTATION;
    }
    let magnitude = (raw.unsigned_abs() as f64).log10();
    let direction = if raw < 0 { -9.0 } else { 9.0 };
    let offset = (magnitude - 9.0).max(0.0) * direction;
    (offset + 25.0).floor() as i64
}

/// Error returned while parsing a tier name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reputation tier: {0}")]
pub struct ParseReputationTierError(pub String);

/// Reputation bands shown next to accounts and used as task requirements.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReputationTier {
    /// 25 to 39, and anything lower.
    #[default]
    Bronze,
    /// 40 to 59.
    Silver,
    /// 60 to 74.
    Gold,
    /// 75 and above.
    Platinum,
}

impl ReputationTier {
    /// Returns the tier a display score falls in.
    #[must_use]
    pub const fn from_score(score: i64) -> Self {
        match score {
            i64::MIN..=39 => Self::Bronze,
            40..=59 => Self::Silver,
            60..=74 => Self::Gold,
            _ => Self::Platinum,
        }
    }

    /// Returns the lowest display score in the tier.
    #[must_use]
    pub const fn min_score(self) -> i64 {
        match self {
            Self::Bronze => 25,
            Self::Silver => 40,
            Self::Gold => 60,
            Self::Platinum => 75,
        }
    }

    /// Returns the lowercase name used in task records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl TryFrom<&str> for ReputationTier {
    type Error = ParseReputationTierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            _ => Err(ParseReputationTierError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReputationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions with an advisory reputation threshold.
///
/// No write path checks these; they exist for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    /// Publishing a task.
    CreateTask,
    /// Submitting work.
    SubmitWork,
    /// Voting on submissions.
    ValidateWork,
}

impl GatedAction {
    /// Returns the lowest display score suggested for the action.
    #[must_use]
    pub const fn min_reputation(self) -> i64 {
        match self {
            Self::CreateTask => 40,
            Self::SubmitWork => 25,
            Self::ValidateWork => 60,
        }
    }

    /// Returns `true` when `score` meets the threshold.
    #[must_use]
    pub const fn permits(self, score: i64) -> bool {
        score >= self.min_reputation()
    }
}
