//! Marketplace configuration.
//!
//! Defaults mirror the public deployment: three public chain nodes, the
//! `datacomb33` discovery tag and a twenty-post discovery page.
//! [`MarketplaceConfig::from_env`] overlays `DATACOMB_*` environment
//! variables on top of the defaults.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Canonical marketplace tag. Every task post carries it first.
pub const MARKETPLACE_TAG: &str = "datacomb33";

/// Parent permlink used for top-level task posts.
pub const PARENT_PERMLINK: &str = "datacomb33";

/// Application identifier written into post metadata.
pub const APP_IDENTIFIER: &str = "datacomb/1.0";

/// Public chain nodes queried in order.
pub const DEFAULT_NODES: [&str; 3] = [
    "https://api.hive.blog",
    "https://api.deathwing.me",
    "https://hive-api.arcange.eu",
];

/// Default number of posts fetched per discovery query.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the store accepts for discussion queries.
pub const MAX_PAGE_SIZE: u32 = 100;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

const NODES_ENV: &str = "DATACOMB_NODES";
const TAG_ENV: &str = "DATACOMB_TAG";
const PAGE_SIZE_ENV: &str = "DATACOMB_PAGE_SIZE";
const TIMEOUT_ENV: &str = "DATACOMB_TIMEOUT_SECS";

/// Errors raised while reading configuration overrides.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The node list contained no usable URLs.
    #[error("no chain nodes configured")]
    NoNodes,

    /// A node URL does not start with `http://` or `https://`.
    #[error("chain node URL '{0}' must start with 'http://' or 'https://'")]
    InvalidNodeUrl(String),

    /// The tag is empty after trimming.
    #[error("marketplace tag must not be empty")]
    EmptyTag,

    /// The page size is zero or exceeds [`MAX_PAGE_SIZE`].
    #[error("page size {0} must be between 1 and 100")]
    InvalidPageSize(u32),

    /// An environment value could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Environment key.
        key: &'static str,
        /// Raw value read from the environment.
        value: String,
    },
}

/// Runtime configuration for store access and task publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Chain node RPC endpoints, tried in order.
    pub nodes: Vec<String>,
    /// Discovery tag.
    pub tag: String,
    /// Parent permlink for new task posts.
    pub parent_permlink: String,
    /// Application identifier written into metadata.
    pub app_identifier: String,
    /// Posts fetched per discovery query.
    pub page_size: u32,
    /// Per-request timeout for node calls.
    pub request_timeout: Duration,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES.iter().map(|node| (*node).to_owned()).collect(),
            tag: MARKETPLACE_TAG.to_owned(),
            parent_permlink: PARENT_PERMLINK.to_owned(),
            app_identifier: APP_IDENTIFIER.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl MarketplaceConfig {
    /// Builds configuration from defaults overlaid with `DATACOMB_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(nodes) = read_env(NODES_ENV) {
            config = config.with_nodes(nodes.split(',').map(str::to_owned))?;
        }
        if let Some(tag) = read_env(TAG_ENV) {
            config = config.with_tag(tag)?;
        }
        if let Some(raw) = read_env(PAGE_SIZE_ENV) {
            let page_size = parse_value(PAGE_SIZE_ENV, &raw)?;
            config = config.with_page_size(page_size)?;
        }
        if let Some(raw) = read_env(TIMEOUT_ENV) {
            let secs: u64 = parse_value(TIMEOUT_ENV, &raw)?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replaces the node list.
    ///
    /// Blank entries are dropped and surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoNodes`] when nothing usable remains, or
    /// [`ConfigError::InvalidNodeUrl`] for a non-HTTP URL.
    pub fn with_nodes(
        mut self,
        nodes: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let mut parsed = Vec::new();
        for node in nodes {
            let trimmed = node.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::InvalidNodeUrl(trimmed.to_owned()));
            }
            parsed.push(trimmed.trim_end_matches('/').to_owned());
        }
        if parsed.is_empty() {
            return Err(ConfigError::NoNodes);
        }
        self.nodes = parsed;
        Ok(self)
    }

    /// Replaces the discovery tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTag`] when the tag is blank.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = tag.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyTag);
        }
        self.tag = trimmed.to_owned();
        Ok(self)
    }

    /// Replaces the discovery page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] outside `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ConfigError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        Ok(self)
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}
