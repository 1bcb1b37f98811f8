//! Error types for the portal.

use propa_search::SearchError;

/// Top-level error type for portal operations.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// User input rejected before any search runs.
    #[error("{0}")]
    Validation(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Persistence error (blob read, write, or encoding).
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search engine error.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = PortalError::Validation("Inserisci un termine di ricerca".into());
        assert_eq!(err.to_string(), "Inserisci un termine di ricerca");
    }

    #[test]
    fn search_errors_convert_transparently() {
        let err: PortalError = SearchError::Config("rows must be greater than 0".into()).into();
        assert!(matches!(err, PortalError::Search(_)));
        assert_eq!(err.to_string(), "config error: rows must be greater than 0");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PortalError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
