//! Error types for the propa-search crate.
//!
//! All errors carry stable string messages suitable for logging. The query
//! engine never surfaces provider errors to its callers: they are logged and
//! the bundled fixtures are used instead.

/// Errors that can occur while fetching or preparing search results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to the external endpoint failed or returned non-2xx.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The external endpoint answered but the payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request did not complete within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration or filter.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for propa-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
