//! Account records as returned by chain nodes.

use serde::{Deserialize, Deserializer, Serialize};

/// An account record exactly as a chain node serves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAccount {
    /// Account name.
    pub name: String,
    /// Raw logarithmic reputation. Nodes serve it as a number or a string.
    #[serde(default, deserialize_with = "deserialize_reputation")]
    pub reputation: i64,
    /// Profile metadata as an unparsed JSON string.
    #[serde(default)]
    pub posting_json_metadata: String,
    /// Liquid balance, for example `12.345 HIVE`.
    #[serde(default)]
    pub balance: String,
    /// Stable-coin balance, for example `1.000 HBD`.
    #[serde(default)]
    pub hbd_balance: String,
    /// Number of posts and comments authored.
    #[serde(default)]
    pub post_count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReputation {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn deserialize_reputation<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawReputation::deserialize(deserializer)? {
        RawReputation::Integer(value) => Ok(value),
        RawReputation::Float(value) => Ok(float_reputation(value)),
        RawReputation::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(serde::de::Error::custom),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "reputations are integral; floats only appear when a node widens large values"
)]
fn float_reputation(value: f64) -> i64 {
    value.trunc() as i64
}
