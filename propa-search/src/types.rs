//! Core types for search results and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filter::Filter;

/// Identifier of a search result.
///
/// Bundled fixtures use small integers; records mapped from dati.gov.it use
/// the package UUID or slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultId {
    /// Numeric identifier.
    Number(i64),
    /// Free-form string identifier.
    Text(String),
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl ResultId {
    /// Whether `raw`, as a user would type it, names this id.
    ///
    /// Compares displayed forms, so a text id made of digits matches too.
    pub fn matches_str(&self, raw: &str) -> bool {
        match self {
            Self::Number(n) => raw.trim().parse::<i64>() == Ok(*n),
            Self::Text(s) => s == raw.trim(),
        }
    }
}

impl From<i64> for ResultId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ResultId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ResultId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::str::FromStr for ResultId {
    type Err = std::convert::Infallible;

    /// Numeric strings become [`ResultId::Number`], anything else text.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

/// A single search hit, attributable to exactly one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique identifier within the active result set.
    pub id: ResultId,
    /// Display title.
    pub title: String,
    /// Longer description or dataset notes.
    pub description: String,
    /// Id of the [`crate::registry::Source`] this hit comes from.
    pub source: String,
    /// Free-form category tag.
    pub category: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    pub date: String,
    /// Landing page of the record.
    pub url: String,
    /// Ordered keyword tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Where the records of a [`SearchOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The live dati.gov.it endpoint answered with at least one record.
    Live,
    /// The fallback provider (bundled fixtures by default) was used.
    Fixture,
}

impl Origin {
    /// Short label for display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Live => "api",
            Self::Fixture => "mock",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The answer to one search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Filtered results, newest first.
    pub results: Vec<SearchResult>,
    /// Number of results.
    pub total: usize,
    /// The query as given.
    pub query: String,
    /// The filter as given.
    pub filter: Filter,
    /// Which provider produced the records.
    pub origin: Origin,
}
