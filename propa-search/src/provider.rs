//! Trait definition for pluggable result providers.
//!
//! The query engine asks a provider for a candidate record set and applies
//! every filter predicate itself. Providers may pre-narrow (the live
//! endpoint does its own text matching) but must never be relied upon to.

use std::fmt;

use crate::error::SearchError;
use crate::filter::Filter;
use crate::types::SearchResult;

/// The implementations a query engine can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Records held in memory (bundled fixtures or test data).
    Static,
    /// The dati.gov.it CKAN `package_search` endpoint.
    DatiGov,
}

impl ProviderKind {
    /// Returns the human-readable name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::DatiGov => "dati.gov.it",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source of candidate search records.
///
/// All implementations must be `Send + Sync` so an engine can be shared
/// across tasks.
pub trait DataProvider: Send + Sync {
    /// Produce candidate records for `query` under `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the records cannot be obtained. The engine
    /// treats any error as "no records".
    fn fetch(
        &self,
        query: &str,
        filter: &Filter,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;

    /// Whether this provider has anything to offer for `filter`.
    ///
    /// Defaults to `true`; the live provider only serves searches that are
    /// unrestricted or restricted to its own source.
    fn serves(&self, filter: &Filter) -> bool {
        let _ = filter;
        true
    }
}
