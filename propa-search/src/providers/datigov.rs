//! dati.gov.it provider, backed by the national CKAN open-data catalogue.
//!
//! Issues a single GET against `package_search` and maps the returned
//! packages into [`SearchResult`]s. Failures propagate as errors; the query
//! engine turns them into a fixture fallback.

use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

use crate::cache::{CacheKey, ResponseCache};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::filter::Filter;
use crate::http;
use crate::provider::{DataProvider, ProviderKind};
use crate::registry::DATIGOV;
use crate::types::{ResultId, SearchResult};

/// Path of the CKAN search action relative to the instance root.
const SEARCH_PATH: &str = "api/3/action/package_search";

/// Public landing page for a dataset; the slug is appended.
const VIEW_URL: &str = "https://www.dati.gov.it/view-dataset/dataset?id=";

const UNTITLED: &str = "Senza titolo";
const NO_DESCRIPTION: &str = "Nessuna descrizione disponibile";
const DEFAULT_CATEGORY: &str = "generale";

/// At most this many tags are kept per record.
const MAX_TAGS: usize = 5;

/// Keyword → category, checked in order against each lowercased tag.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("ambiente", "ambiente"),
    ("economia", "economia"),
    ("salute", "salute"),
    ("trasporti", "trasporti"),
    ("istruzione", "istruzione"),
    ("lavoro", "lavoro"),
    ("demographic", "demografia"),
    ("popolazione", "demografia"),
];

/// Live provider backed by the CKAN `package_search` action.
#[derive(Debug, Clone)]
pub struct DatiGovProvider {
    client: reqwest::Client,
    endpoint: Url,
    rows: usize,
    cache: ResponseCache,
}

impl DatiGovProvider {
    /// Build a provider from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `base_url` is not a valid URL, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)
            .and_then(|u| u.join(SEARCH_PATH))
            .map_err(|e| SearchError::Config(format!("invalid base_url {}: {e}", config.base_url)))?;

        Ok(Self {
            client: http::build_client(config)?,
            endpoint,
            rows: config.rows,
            cache: ResponseCache::new(config.cache_ttl_seconds),
        })
    }

    /// The resolved `package_search` URL, without query parameters.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `query` under `filter`.
    ///
    /// Sends `q` and `rows`; adds `fq=tags:<category>` when a category is
    /// selected.
    pub fn request_url(&self, query: &str, filter: &Filter) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("rows", &self.rows.to_string());
            if let Some(category) = filter.category.value() {
                pairs.append_pair("fq", &format!("tags:{category}"));
            }
        }
        url
    }
}

impl DataProvider for DatiGovProvider {
    async fn fetch(&self, query: &str, filter: &Filter) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "dati.gov.it search");

        let key = CacheKey::new(query, filter);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(count = hit.len(), "dati.gov.it cache hit");
            return Ok(hit);
        }

        let response = self
            .client
            .get(self.request_url(query, filter))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(format!("dati.gov.it request timed out: {e}"))
                } else {
                    SearchError::Http(format!("dati.gov.it request failed: {e}"))
                }
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("dati.gov.it HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("dati.gov.it response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "dati.gov.it response received");

        let today = chrono::Local::now().date_naive();
        let results = parse_package_search(&body, today)?;
        self.cache.insert(key, results.clone()).await;
        Ok(results)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DatiGov
    }

    fn serves(&self, filter: &Filter) -> bool {
        filter.source.value().is_none_or(|s| s == DATIGOV)
    }
}

#[derive(Debug, Deserialize)]
struct PackageSearchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<PackageSearchResult>,
}

#[derive(Debug, Deserialize)]
struct PackageSearchResult {
    #[serde(default)]
    results: Option<Vec<Package>>,
}

#[derive(Debug, Deserialize)]
struct Package {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    tags: Option<Vec<Tag>>,
    #[serde(default)]
    metadata_modified: Option<String>,
    #[serde(default)]
    metadata_created: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tag {
    Object {
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Plain(String),
}

impl Tag {
    fn label(&self) -> Option<&str> {
        match self {
            Self::Object { display_name, name } => non_empty(display_name.as_deref())
                .or_else(|| non_empty(name.as_deref())),
            Self::Plain(s) => non_empty(Some(s.as_str())),
        }
    }
}

/// Parse a `package_search` body into search results.
///
/// Extracted as a separate function for testability with canned payloads.
/// `today` stands in for packages that carry no metadata timestamps.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not valid JSON of the
/// expected shape. A well-formed body with `success: false` or no result
/// list yields an empty vector.
pub fn parse_package_search(
    body: &str,
    today: NaiveDate,
) -> Result<Vec<SearchResult>, SearchError> {
    let response: PackageSearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("dati.gov.it payload: {e}")))?;

    if !response.success {
        tracing::debug!("dati.gov.it reported success=false");
        return Ok(Vec::new());
    }

    let packages = match response.result.and_then(|r| r.results) {
        Some(p) => p,
        None => return Ok(Vec::new()),
    };

    let results: Vec<SearchResult> = packages
        .into_iter()
        .map(|package| package_to_result(package, today))
        .collect();

    tracing::debug!(count = results.len(), "dati.gov.it results parsed");
    Ok(results)
}

fn package_to_result(package: Package, today: NaiveDate) -> SearchResult {
    let labels: Vec<String> = package
        .tags
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(Tag::label)
        .map(str::to_owned)
        .collect();

    let id = non_empty(package.id.as_deref())
        .or_else(|| non_empty(package.name.as_deref()))
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_owned);

    let slug = non_empty(package.name.as_deref()).unwrap_or(&id).to_owned();

    let date = non_empty(package.metadata_modified.as_deref())
        .or_else(|| non_empty(package.metadata_created.as_deref()))
        .map_or_else(|| today.format("%Y-%m-%d").to_string(), date_part);

    SearchResult {
        id: ResultId::Text(id),
        title: non_empty(package.title.as_deref())
            .unwrap_or(UNTITLED)
            .to_owned(),
        description: non_empty(package.notes.as_deref())
            .unwrap_or(NO_DESCRIPTION)
            .to_owned(),
        source: DATIGOV.to_owned(),
        category: extract_category(&labels).to_owned(),
        date,
        url: format!("{VIEW_URL}{slug}"),
        tags: labels.into_iter().take(MAX_TAGS).collect(),
    }
}

/// Derive a category from free-form tags; the first tag containing a known
/// keyword wins.
pub fn extract_category<S: AsRef<str>>(tags: &[S]) -> &'static str {
    for tag in tags {
        let lower = tag.as_ref().to_lowercase();
        if let Some((_, category)) = CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
        {
            return category;
        }
    }
    DEFAULT_CATEGORY
}

/// `2024-01-15T10:20:30.000000` → `2024-01-15`.
fn date_part(timestamp: &str) -> String {
    timestamp
        .get(..10)
        .unwrap_or(timestamp)
        .to_owned()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RESPONSE: &str = r#"{
        "success": true,
        "result": {
            "count": 3,
            "results": [
                {
                    "id": "a1b2",
                    "name": "qualita-aria-milano",
                    "title": "Qualità dell'aria Milano",
                    "notes": "Centraline ARPA",
                    "metadata_modified": "2024-02-03T08:15:00.123456",
                    "metadata_created": "2020-01-01T00:00:00",
                    "tags": [
                        {"display_name": "Aria", "name": "aria"},
                        {"display_name": "Ambiente", "name": "ambiente"},
                        {"name": "pm10"},
                        {"display_name": "no2"},
                        {"display_name": "o3"},
                        {"display_name": "centraline"}
                    ]
                },
                {
                    "name": "popolazione-2023",
                    "title": "",
                    "metadata_created": "2023-06-30T12:00:00",
                    "tags": ["Popolazione residente"]
                },
                {
                    "tags": null
                }
            ]
        }
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    fn provider(base_url: &str) -> DatiGovProvider {
        let config = SearchConfig {
            base_url: base_url.into(),
            ..Default::default()
        };
        DatiGovProvider::new(&config).expect("provider")
    }

    #[test]
    fn parse_maps_fields() {
        let results = parse_package_search(MOCK_RESPONSE, today()).expect("parse");
        assert_eq!(results.len(), 3);

        let first = &results[0];
        assert_eq!(first.id, ResultId::from("a1b2"));
        assert_eq!(first.title, "Qualità dell'aria Milano");
        assert_eq!(first.description, "Centraline ARPA");
        assert_eq!(first.source, "datigov");
        assert_eq!(first.date, "2024-02-03");
        assert_eq!(
            first.url,
            "https://www.dati.gov.it/view-dataset/dataset?id=qualita-aria-milano"
        );
        assert_eq!(first.category, "ambiente");
    }

    #[test]
    fn parse_keeps_at_most_five_tags() {
        let results = parse_package_search(MOCK_RESPONSE, today()).expect("parse");
        assert_eq!(results[0].tags, vec!["Aria", "Ambiente", "pm10", "no2", "o3"]);
    }

    #[test]
    fn parse_applies_placeholders_and_fallbacks() {
        let results = parse_package_search(MOCK_RESPONSE, today()).expect("parse");

        let second = &results[1];
        assert_eq!(second.id, ResultId::from("popolazione-2023"));
        assert_eq!(second.title, "Senza titolo");
        assert_eq!(second.description, "Nessuna descrizione disponibile");
        assert_eq!(second.date, "2023-06-30");
        assert_eq!(second.category, "demografia");
        assert_eq!(second.tags, vec!["Popolazione residente"]);

        let third = &results[2];
        assert_eq!(third.date, "2024-03-01");
        assert_eq!(third.category, "generale");
        assert!(third.tags.is_empty());
        assert!(matches!(third.id, ResultId::Text(ref s) if !s.is_empty()));
    }

    #[test]
    fn parse_unsuccessful_payload_is_empty() {
        let body = r#"{"success": false, "error": {"message": "boom"}}"#;
        let results = parse_package_search(body, today()).expect("parse");
        assert!(results.is_empty());
    }

    #[test]
    fn parse_missing_result_list_is_empty() {
        let body = r#"{"success": true, "result": {"count": 0}}"#;
        assert!(parse_package_search(body, today()).expect("parse").is_empty());
    }

    #[test]
    fn parse_malformed_json_is_error() {
        let err = parse_package_search("<html>maintenance</html>", today()).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn extract_category_uses_keyword_table_order() {
        assert_eq!(extract_category(&["Lavoro e Ambiente"]), "ambiente");
        assert_eq!(extract_category(&["demographics"]), "demografia");
        assert_eq!(extract_category(&["turismo", "SALUTE pubblica"]), "salute");
        assert_eq!(extract_category::<&str>(&[]), "generale");
        assert_eq!(extract_category(&["turismo"]), "generale");
    }

    #[test]
    fn endpoint_is_joined_to_base_url() {
        let p = provider("https://www.dati.gov.it");
        assert_eq!(
            p.endpoint().as_str(),
            "https://www.dati.gov.it/api/3/action/package_search"
        );
        let nested = provider("https://ckan.example.org/catalogo/");
        assert_eq!(
            nested.endpoint().as_str(),
            "https://ckan.example.org/catalogo/api/3/action/package_search"
        );
    }

    #[test]
    fn request_url_carries_query_rows_and_tag_filter() {
        let p = provider("https://www.dati.gov.it");
        let url = p.request_url("qualità aria", &Filter::all().with_category("ambiente"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "qualità aria".to_string()),
                ("rows".to_string(), "20".to_string()),
                ("fq".to_string(), "tags:ambiente".to_string()),
            ]
        );
    }

    #[test]
    fn request_url_omits_tag_filter_for_all_categories() {
        let p = provider("https://www.dati.gov.it");
        let url = p.request_url("aria", &Filter::all());
        assert!(!url.query_pairs().any(|(k, _)| k == "fq"));
    }

    #[test]
    fn serves_only_unrestricted_or_own_source() {
        let p = provider("https://www.dati.gov.it");
        assert!(p.serves(&Filter::all()));
        assert!(p.serves(&Filter::all().with_source("datigov")));
        assert!(!p.serves(&Filter::all().with_source("normattiva")));
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = SearchConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = DatiGovProvider::new(&config).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
