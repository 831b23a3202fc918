//! The cached identity of the logged-in user.

use super::reputation_transform;
use crate::chain::domain::ChainAccount;
use serde::{Deserialize, Serialize};
use tracing::warn;

const DEMO_REPUTATION: i64 = 65;
const DEMO_BALANCE: &str = "100.000 HIVE";
const DEMO_HBD_BALANCE: &str = "50.000 HBD";
const DEMO_POST_COUNT: u64 = 42;
const DEMO_ABOUT: &str = "Demo user for testing DataComb";

/// Profile fields an account publishes about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Banner URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Parsed posting metadata of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// The `profile` object, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetails>,
}

impl ProfileMetadata {
    /// Parses posting metadata. Blank or malformed input reads as empty.
    #[must_use]
    pub fn parse(raw: &str, account: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|error| {
            warn!(account, %error, "ignoring malformed posting metadata");
            Self::default()
        })
    }
}

/// The logged-in user's profile, cached for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account name.
    pub name: String,
    /// Display reputation.
    pub reputation: i64,
    /// Parsed posting metadata.
    #[serde(default)]
    pub metadata: ProfileMetadata,
    /// Liquid balance.
    pub balance: String,
    /// Stable-coin balance.
    pub hbd_balance: String,
    /// Number of posts and comments authored.
    pub post_count: u64,
}

impl UserProfile {
    /// Builds a profile from a chain account record.
    #[must_use]
    pub fn from_account(account: ChainAccount) -> Self {
        let metadata = ProfileMetadata::parse(&account.posting_json_metadata, &account.name);
        Self {
            reputation: reputation_transform(account.reputation),
            metadata,
            name: account.name,
            balance: account.balance,
            hbd_balance: account.hbd_balance,
            post_count: account.post_count,
        }
    }

    /// Builds the simulated profile used when no signer is available.
    #[must_use]
    pub fn demo(name: impl Into<String>) -> Self {
        let account = name.into();
        Self {
            metadata: ProfileMetadata {
                profile: Some(ProfileDetails {
                    name: Some(account.clone()),
                    about: Some(DEMO_ABOUT.to_owned()),
                    ..ProfileDetails::default()
                }),
            },
            name: account,
            reputation: DEMO_REPUTATION,
            balance: DEMO_BALANCE.to_owned(),
            hbd_balance: DEMO_HBD_BALANCE.to_owned(),
            post_count: DEMO_POST_COUNT,
        }
    }

    /// Returns the display name, falling back to the account name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.metadata
            .profile
            .as_ref()
            .and_then(|profile| profile.name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}
