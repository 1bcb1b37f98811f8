//! Core query engine: live lookup, fallback, filter, sort.
//!
//! The engine owns an optional live provider and a fallback provider. A
//! search consults the live provider once when it serves the filter, falls
//! back when that yields nothing or fails, then narrows and orders the
//! chosen records locally.

use crate::config::{DatePolicy, SearchConfig, SearchMode};
use crate::error::SearchError;
use crate::filter::Filter;
use crate::provider::DataProvider;
use crate::providers::{DatiGovProvider, StaticProvider};
use crate::registry::SourceRegistry;
use crate::types::{Origin, SearchOutcome, SearchResult};

use super::predicates::{apply_filters, sort_by_date_desc};

/// Search service assembled from a live and a fallback provider.
///
/// Construct once at start-up and share; it holds no per-search state.
#[derive(Debug, Clone)]
pub struct QueryEngine<L = DatiGovProvider, F = StaticProvider> {
    live: Option<L>,
    fallback: F,
    registry: SourceRegistry,
    date_policy: DatePolicy,
}

impl QueryEngine {
    /// Build the production engine from `config`.
    ///
    /// [`SearchMode::Hybrid`] wires the dati.gov.it provider in front of the
    /// bundled fixtures; [`SearchMode::Offline`] uses the fixtures alone.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let live = match config.mode {
            SearchMode::Hybrid => Some(DatiGovProvider::new(config)?),
            SearchMode::Offline => None,
        };
        tracing::debug!(mode = ?config.mode, "query engine configured");
        Ok(Self::new(live, StaticProvider::bundled()).with_date_policy(config.date_policy))
    }
}

impl<L: DataProvider, F: DataProvider> QueryEngine<L, F> {
    /// Assemble an engine from explicit providers.
    pub fn new(live: Option<L>, fallback: F) -> Self {
        Self {
            live,
            fallback,
            registry: SourceRegistry::bundled(),
            date_policy: DatePolicy::default(),
        }
    }

    /// Override the treatment of unparseable record dates.
    #[must_use]
    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.date_policy = policy;
        self
    }

    /// Override the source catalogue.
    #[must_use]
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The source catalogue this engine resolves names against.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Returns `true` if a live provider is wired in.
    pub fn has_live_provider(&self) -> bool {
        self.live.is_some()
    }

    /// Run one search.
    ///
    /// # Pipeline
    ///
    /// 1. If a live provider serves `filter`, query it once (no retries)
    /// 2. If it fails or yields nothing, fetch from the fallback provider
    /// 3. Apply the filter predicates in their fixed order
    /// 4. Sort by date, newest first
    ///
    /// Never fails: provider errors are logged and degrade to fewer records.
    pub async fn search(&self, query: &str, filter: &Filter) -> SearchOutcome {
        let (records, origin) = match self.live_records(query, filter).await {
            Some(records) => (records, Origin::Live),
            None => (self.fallback_records(query, filter).await, Origin::Fixture),
        };

        let candidates = records.len();
        let mut results = apply_filters(records, query, filter, self.date_policy);
        sort_by_date_desc(&mut results);

        tracing::debug!(
            %origin,
            candidates,
            matched = results.len(),
            "search complete"
        );

        SearchOutcome {
            total: results.len(),
            results,
            query: query.to_owned(),
            filter: filter.clone(),
            origin,
        }
    }

    /// Records from the live provider, or `None` when it is absent, does
    /// not serve this filter, fails, or comes back empty.
    async fn live_records(&self, query: &str, filter: &Filter) -> Option<Vec<SearchResult>> {
        let live = self.live.as_ref()?;
        if !live.serves(filter) {
            tracing::debug!(provider = %live.kind(), "live provider skipped for source filter");
            return None;
        }

        match live.fetch(query, filter).await {
            Ok(records) if records.is_empty() => {
                tracing::debug!(provider = %live.kind(), "live provider returned no records, using fallback");
                None
            }
            Ok(records) => Some(records),
            Err(err) => {
                tracing::warn!(provider = %live.kind(), error = %err, "live search failed, using fallback");
                None
            }
        }
    }

    async fn fallback_records(&self, query: &str, filter: &Filter) -> Vec<SearchResult> {
        match self.fallback.fetch(query, filter).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(provider = %self.fallback.kind(), error = %err, "fallback provider failed");
                Vec::new()
            }
        }
    }
}
