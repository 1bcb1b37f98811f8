//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls whether the live dati.gov.it endpoint is
//! consulted, how the request is shaped, response caching, and how records
//! with unparseable dates are treated by date-range filters.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Default CKAN instance queried in [`SearchMode::Hybrid`].
pub const DEFAULT_BASE_URL: &str = "https://www.dati.gov.it";

/// Which providers the query engine consults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Try the live endpoint first, fall back to the bundled fixtures.
    #[default]
    Hybrid,
    /// Never touch the network; serve the bundled fixtures only.
    Offline,
}

/// Treatment of records whose date cannot be parsed when a date bound is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Drop the record: it cannot be shown to satisfy the bound.
    #[default]
    Exclude,
    /// Let the record through the date bounds untouched.
    Keep,
}

/// Configuration for the query engine and the live provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider selection.
    pub mode: SearchMode,
    /// Root URL of the CKAN instance (without `/api/3/...`).
    pub base_url: String,
    /// `rows` parameter sent to `package_search`.
    pub rows: usize,
    /// HTTP request timeout in seconds. The request is never retried.
    pub timeout_seconds: u64,
    /// How long live responses are cached in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent. If `None`, `propa/<version>` is sent.
    pub user_agent: Option<String>,
    /// Date-bound policy for unparseable record dates.
    pub date_policy: DatePolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            rows: 20,
            timeout_seconds: 10,
            cache_ttl_seconds: 300,
            user_agent: None,
            date_policy: DatePolicy::default(),
        }
    }
}

impl SearchConfig {
    /// A configuration that never touches the network.
    pub fn offline() -> Self {
        Self {
            mode: SearchMode::Offline,
            ..Self::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `rows` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `base_url` must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.rows == 0 {
            return Err(SearchError::Config("rows must be greater than 0".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url {}: {e}", self.base_url)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SearchError::Config(format!(
                "base_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(())
    }
}
