//! # propa-search
//!
//! Search over Italian public-administration open data.
//!
//! This crate holds the catalogue of data sources, a bundled fixture
//! dataset, and a query engine that consults the dati.gov.it CKAN endpoint
//! and falls back to the fixtures whenever the live answer is empty or the
//! request fails.
//!
//! ## Design
//!
//! - [`DataProvider`] is the seam between the engine and where records come
//!   from: [`providers::StaticProvider`] (fixtures or any in-memory records)
//!   and [`providers::DatiGovProvider`] (live HTTP)
//! - The engine applies every filter locally in a fixed order, then sorts
//!   newest first
//! - Live responses are cached in memory with a configurable TTL
//! - A failing endpoint never surfaces as an error: the search degrades to
//!   the fixtures
//!
//! ## Logging
//!
//! - Query text is logged only at trace level
//! - Fallbacks are logged at warn level

pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod http;
pub mod provider;
pub mod providers;
pub mod query;
pub mod registry;
pub mod types;

pub use config::{DatePolicy, SearchConfig, SearchMode};
pub use error::{Result, SearchError};
pub use filter::{Filter, Selector, SourceFilter};
pub use provider::{DataProvider, ProviderKind};
pub use query::QueryEngine;
pub use registry::{Source, SourceRegistry};
pub use types::{Origin, ResultId, SearchOutcome, SearchResult};

/// Run one search with an engine built from `config`.
///
/// Convenience for one-shot callers; long-lived callers should build a
/// [`QueryEngine`] once and reuse it so the response cache is shared.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` or `filter` is invalid.
/// Provider failures never surface here.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> propa_search::Result<()> {
/// let config = propa_search::SearchConfig::default();
/// let filter = propa_search::Filter::all().with_category("ambiente");
/// let outcome = propa_search::search("qualità aria", &filter, &config).await?;
/// for result in &outcome.results {
///     println!("{} ({})", result.title, result.date);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, filter: &Filter, config: &SearchConfig) -> Result<SearchOutcome> {
    filter.validate()?;
    let engine = QueryEngine::from_config(config)?;
    Ok(engine.search(query, filter).await)
}

/// Search the bundled fixtures only, never touching the network.
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_offline(query: &str, filter: &Filter) -> Result<SearchOutcome> {
    search(query, filter, &SearchConfig::offline()).await
}
