//! The portal service: query engine plus local store, built once at start-up.
//!
//! Every presentation layer (the CLI today) talks to a [`Portal`] instead of
//! reaching for the engine or the store directly, so validation and history
//! recording happen in exactly one place.

use std::path::Path;

use chrono::Utc;
use propa_search::providers::{DatiGovProvider, StaticProvider};
use propa_search::{
    DataProvider, Filter, QueryEngine, SearchOutcome, SearchResult, Selector, Source,
    SourceRegistry,
};

use crate::analytics::{FullReport, full_report};
use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::guide::recommend_source;
use crate::storage::LocalStore;
use crate::transfer::{self, UserData};

/// Shown when a search is attempted without a query.
pub const EMPTY_QUERY_MESSAGE: &str = "Inserisci un termine di ricerca";

/// Search, history, bookmarks, and analytics behind one handle.
#[derive(Debug)]
pub struct Portal<L = DatiGovProvider, F = StaticProvider> {
    engine: QueryEngine<L, F>,
    store: LocalStore,
}

impl Portal {
    /// Build the production portal from `config`, persisting under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &PortalConfig, data_dir: &Path) -> Result<Self> {
        config.validate()?;
        let engine = QueryEngine::from_config(&config.search)?;
        let store = LocalStore::open(data_dir, config.storage.history_cap);
        Ok(Self::new(engine, store))
    }
}

impl<L: DataProvider, F: DataProvider> Portal<L, F> {
    pub fn new(engine: QueryEngine<L, F>, store: LocalStore) -> Self {
        Self { engine, store }
    }

    /// Run a search and record it in the history.
    ///
    /// The query is trimmed first; the trimmed query is what gets searched
    /// and recorded.
    ///
    /// # Errors
    ///
    /// - [`PortalError::Validation`] if the query is blank
    /// - [`PortalError::Search`] if the filter is contradictory
    ///
    /// Provider failures are not errors: the engine falls back to the
    /// bundled fixtures.
    pub async fn search(&self, query: &str, filter: &Filter) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PortalError::Validation(EMPTY_QUERY_MESSAGE.into()));
        }
        filter.validate()?;

        tracing::trace!(query, "portal search");
        let outcome = self.engine.search(query, filter).await;
        self.store.add_history(query, filter);
        tracing::info!(total = outcome.total, origin = %outcome.origin, "search complete");
        Ok(outcome)
    }

    /// [`Self::search`] restricted to one source.
    ///
    /// # Errors
    ///
    /// As [`Self::search`], plus [`PortalError::Validation`] for an unknown
    /// source id.
    pub async fn search_source(
        &self,
        source_id: &str,
        query: &str,
        filter: &Filter,
    ) -> Result<SearchOutcome> {
        if self.registry().get_source(source_id).is_none() {
            return Err(PortalError::Validation(format!(
                "Fonte sconosciuta: {source_id}"
            )));
        }
        let mut scoped = filter.clone();
        scoped.source = Selector::Only(source_id.to_owned());
        self.search(query, &scoped).await
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn registry(&self) -> &SourceRegistry {
        self.engine.registry()
    }

    /// Catalogue sorted by display name.
    pub fn list_sources(&self) -> Vec<&'static Source> {
        self.registry().list_sources()
    }

    pub fn get_source(&self, id: &str) -> Option<&'static Source> {
        self.registry().get_source(id)
    }

    /// Recommended source for the guided search answers.
    pub fn recommend(&self, need: &str, sector: &str) -> Option<&'static Source> {
        self.get_source(recommend_source(need, sector))
    }

    /// Full analytics over `results` and the stored history and bookmarks.
    pub fn analytics(&self, results: &[SearchResult]) -> FullReport {
        full_report(
            results,
            &self.store.list_history(),
            &self.store.list_bookmarks(),
            self.registry(),
            Utc::now(),
        )
    }

    pub fn export_data(&self) -> UserData {
        transfer::export_data(&self.store)
    }

    /// # Errors
    ///
    /// Returns the storage error if a section cannot be persisted.
    pub fn import_data(&self, data: UserData) -> Result<()> {
        transfer::import_data(&self.store, data)
    }
}
