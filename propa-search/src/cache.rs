//! In-memory cache for live provider responses.
//!
//! Caches the mapped records returned by the dati.gov.it endpoint keyed by
//! the (lowercased query, category) pair, which is everything that shapes
//! the outgoing request. Uses [`moka`] for async-friendly caching with TTL
//! and automatic eviction. Each provider owns its cache.

use std::time::Duration;

use moka::future::Cache;

use crate::filter::Filter;
use crate::types::SearchResult;

/// Maximum number of cached responses.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Composite cache key: normalised query + category restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Category sent as `fq=tags:<category>`, if any.
    category: Option<String>,
}

impl CacheKey {
    /// Build a deterministic cache key from a query and filter.
    ///
    /// Only the parts of the filter that reach the endpoint participate;
    /// every other predicate is applied locally after the cache.
    pub fn new(query: &str, filter: &Filter) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            category: filter.category.value().map(str::to_owned),
        }
    }
}

/// Response cache; a zero TTL yields a cache that stores nothing.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Option<Cache<CacheKey, Vec<SearchResult>>>,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("enabled", &self.inner.is_some())
            .finish()
    }
}

impl ResponseCache {
    /// Create a cache with the given TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        let inner = (ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHE_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Returns `true` if responses are retained.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up cached records. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<SearchResult>> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Store records under `key`. No-op when disabled.
    pub async fn insert(&self, key: CacheKey, results: Vec<SearchResult>) {
        if let Some(cache) = &self.inner {
            cache.insert(key, results).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultId;

    fn record(id: i64) -> SearchResult {
        SearchResult {
            id: ResultId::Number(id),
            title: format!("Record {id}"),
            description: String::new(),
            source: "datigov".into(),
            category: "generale".into(),
            date: "2024-01-01".into(),
            url: format!("https://example.com/{id}"),
            tags: vec![],
        }
    }

    #[test]
    fn cache_key_normalises_query() {
        let filter = Filter::all();
        assert_eq!(
            CacheKey::new("  Ambiente ", &filter),
            CacheKey::new("ambiente", &filter)
        );
    }

    #[test]
    fn cache_key_differs_by_category() {
        let a = CacheKey::new("aria", &Filter::all());
        let b = CacheKey::new("aria", &Filter::all().with_category("ambiente"));
        assert_ne!(a, b);
    }

    #[test]
    fn cache_key_ignores_local_only_predicates() {
        let a = CacheKey::new("aria", &Filter::all());
        let b = CacheKey::new("aria", &Filter::all().with_source("datigov"));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn enabled_cache_round_trips() {
        let cache = ResponseCache::new(60);
        assert!(cache.is_enabled());
        let key = CacheKey::new("aria", &Filter::all());
        assert!(cache.get(&key).await.is_none());

        cache.insert(key.clone(), vec![record(1), record(2)]).await;
        let hit = cache.get(&key).await.expect("cache hit");
        assert_eq!(hit.len(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let cache = ResponseCache::new(0);
        assert!(!cache.is_enabled());
        let key = CacheKey::new("aria", &Filter::all());
        cache.insert(key.clone(), vec![record(1)]).await;
        assert!(cache.get(&key).await.is_none());
        assert!(!ResponseCache::disabled().is_enabled());
    }
}
