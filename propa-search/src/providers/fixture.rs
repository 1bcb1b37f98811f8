//! In-memory provider: the bundled fixtures, or any records a caller supplies.

use crate::error::SearchError;
use crate::filter::Filter;
use crate::fixtures::bundled_results;
use crate::provider::{DataProvider, ProviderKind};
use crate::types::SearchResult;

/// Serves a fixed record set; all narrowing is left to the engine.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    records: Vec<SearchResult>,
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::bundled()
    }
}

impl StaticProvider {
    /// The records compiled into the program.
    pub fn bundled() -> Self {
        Self::new(bundled_results())
    }

    /// Serve exactly `records`.
    pub fn new(records: Vec<SearchResult>) -> Self {
        Self { records }
    }

    /// The records this provider serves.
    pub fn records(&self) -> &[SearchResult] {
        &self.records
    }
}

impl DataProvider for StaticProvider {
    async fn fetch(
        &self,
        query: &str,
        _filter: &Filter,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, count = self.records.len(), "static provider fetch");
        Ok(self.records.clone())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Static
    }
}
