//! Dashboard configuration.
//!
//! # Responsibility
//! - Declare divisions, their feed handles and report options.
//! - Hold the viewer allow-list, feed cache and logging settings.
//!
//! # Invariants
//! - A loaded configuration has passed `validate()`.
//! - Division slugs are unique, lowercase and URL-safe.
//! - The cutoff policy is chosen per division; nothing standardizes it.

use crate::access::AllowList;
use crate::logging::LogSettings;
use crate::report::cutoff::CutoffPolicy;
use crate::report::table::TextualLayout;
use crate::source::cache::{CacheSettings, StalePolicy, DEFAULT_CACHE_TTL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Handles of the three feeds of one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedHandles {
    pub targets: String,
    pub results: String,
    pub memos: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionConfig {
    /// URL-safe identifier, e.g. `global-strategy`.
    pub slug: String,
    /// Display name, e.g. `글로벌전략본부`.
    pub title: String,
    /// Substring matched against the memo feed's division column.
    pub memo_token: String,
    pub feeds: FeedHandles,
    #[serde(default)]
    pub cutoff_policy: CutoffPolicy,
    #[serde(default)]
    pub textual_layout: TextualLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub allowed_emails: Vec<String>,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub stale_policy: StalePolicy,
    pub divisions: Vec<DivisionConfig>,
    /// File logging for the host; `None` leaves logging to the host.
    #[serde(default)]
    pub logging: Option<LogSettings>,
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

impl DashboardConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(body: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(body).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&body)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.allowed_emails.iter().all(|email| email.trim().is_empty()) {
            return Err(ConfigError::EmptyAllowList);
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::ZeroCacheTtl);
        }
        if self.divisions.is_empty() {
            return Err(ConfigError::NoDivisions);
        }

        let mut slugs = BTreeSet::new();
        for division in &self.divisions {
            if !is_valid_slug(&division.slug) {
                return Err(ConfigError::InvalidSlug(division.slug.clone()));
            }
            if !slugs.insert(division.slug.as_str()) {
                return Err(ConfigError::DuplicateSlug(division.slug.clone()));
            }
            if division.memo_token.trim().is_empty() {
                return Err(ConfigError::EmptyMemoToken(division.slug.clone()));
            }
            for (feed, handle) in [
                ("targets", &division.feeds.targets),
                ("results", &division.feeds.results),
                ("memos", &division.feeds.memos),
            ] {
                if handle.trim().is_empty() {
                    return Err(ConfigError::EmptyFeedHandle {
                        slug: division.slug.clone(),
                        feed,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn division(&self, slug: &str) -> Option<&DivisionConfig> {
        let slug = slug.trim();
        self.divisions.iter().find(|division| division.slug == slug)
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.allowed_emails)
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            stale_policy: self.stale_policy,
        }
    }
}

fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    EmptyAllowList,
    ZeroCacheTtl,
    NoDivisions,
    InvalidSlug(String),
    DuplicateSlug(String),
    EmptyMemoToken(String),
    EmptyFeedHandle { slug: String, feed: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read config `{path}`: {message}"),
            Self::Parse(message) => write!(f, "invalid config document: {message}"),
            Self::EmptyAllowList => write!(f, "allowed_emails must contain at least one email"),
            Self::ZeroCacheTtl => write!(f, "cache_ttl_secs must be greater than zero"),
            Self::NoDivisions => write!(f, "at least one division must be configured"),
            Self::InvalidSlug(slug) => write!(f, "division slug is invalid: `{slug}`"),
            Self::DuplicateSlug(slug) => write!(f, "division slug is duplicated: `{slug}`"),
            Self::EmptyMemoToken(slug) => {
                write!(f, "division `{slug}` must declare a non-empty memo_token")
            }
            Self::EmptyFeedHandle { slug, feed } => {
                write!(f, "division `{slug}` has an empty `{feed}` feed handle")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::is_valid_slug;

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("global-strategy"));
        assert!(is_valid_slug("finance_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Global"));
        assert!(!is_valid_slug("재경본부"));
        assert!(!is_valid_slug("a b"));
    }
}
