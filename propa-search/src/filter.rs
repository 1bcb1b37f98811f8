//! Search filters.
//!
//! A [`Filter`] is built fresh for every search request. Source-specific
//! refinements live in [`SourceFilter`], a tagged union keyed by source id,
//! so the fields of one source can never leak into a search on another.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SearchError;

/// Sentinel used on the wire for "no restriction".
pub const ALL: &str = "all";

/// A source or category restriction: either everything or one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    /// No restriction (`"all"` on the wire).
    #[default]
    All,
    /// Restrict to exactly this value.
    Only(String),
}

impl Selector {
    /// Returns the selected value, or `None` for [`Selector::All`].
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Returns `true` if this selector restricts nothing.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<Selector> for String {
    fn from(value: Selector) -> Self {
        match value {
            Selector::All => ALL.to_owned(),
            Selector::Only(v) => v,
        }
    }
}

/// Refinements that only make sense for one particular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SourceFilter {
    /// Normattiva legislation.
    Normattiva {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        act_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        act_number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<String>,
    },
    /// Gazzetta Ufficiale issues.
    Gazzetta {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        series: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gazzette_number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<String>,
    },
    /// Indice PA.
    Ipa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        organization: Option<String>,
    },
    /// Innovazione.gov.it programmes.
    Innovazione {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sector: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
}

impl SourceFilter {
    /// Id of the source this refinement is scoped to.
    pub fn source_id(&self) -> &'static str {
        match self {
            Self::Normattiva { .. } => "normattiva",
            Self::Gazzetta { .. } => "gazzetta",
            Self::Ipa { .. } => "ipa",
            Self::Innovazione { .. } => "innovazione",
        }
    }

    /// Non-empty field values, trimmed, in declaration order.
    pub fn terms(&self) -> Vec<&str> {
        let fields: Vec<&Option<String>> = match self {
            Self::Normattiva {
                act_type,
                act_number,
                year,
            } => vec![act_type, act_number, year],
            Self::Gazzetta {
                series,
                gazzette_number,
                year,
            } => vec![series, gazzette_number, year],
            Self::Ipa { organization } => vec![organization],
            Self::Innovazione {
                content_type,
                sector,
                status,
            } => vec![content_type, sector, status],
        };
        fields
            .into_iter()
            .filter_map(|f| f.as_deref().map(str::trim))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// A refinement is active once any of its fields holds a value.
    pub fn is_active(&self) -> bool {
        !self.terms().is_empty()
    }
}

/// The predicate set narrowing one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter {
    /// Source restriction.
    pub source: Selector,
    /// Category restriction (matches the category or an exact tag).
    pub category: Selector,
    /// Inclusive lower date bound.
    #[serde(
        deserialize_with = "empty_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    #[serde(
        deserialize_with = "empty_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_to: Option<NaiveDate>,
    /// Optional source-specific refinement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific: Option<SourceFilter>,
}

impl Filter {
    /// A filter that restricts nothing.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Selector>) -> Self {
        self.source = source.into();
        self
    }

    /// Restrict to one category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Selector>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the inclusive date range; `None` leaves a side open.
    #[must_use]
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Attach a source-specific refinement.
    #[must_use]
    pub fn with_specific(mut self, specific: SourceFilter) -> Self {
        self.specific = Some(specific);
        self
    }

    /// Returns `true` if either date bound is set.
    pub fn has_date_bounds(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Checks the filter for contradictions.
    ///
    /// - `date_from` must not be after `date_to`
    /// - a source-specific refinement cannot target a different source than
    ///   the source restriction
    pub fn validate(&self) -> Result<(), SearchError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(SearchError::Config(format!(
                    "dateFrom {from} is after dateTo {to}"
                )));
            }
        }
        if let (Some(specific), Some(source)) = (&self.specific, self.source.value()) {
            if specific.source_id() != source {
                return Err(SearchError::Config(format!(
                    "{} filters cannot be combined with source {source}",
                    specific.source_id()
                )));
            }
        }
        Ok(())
    }
}

/// Browser-era history entries store absent bounds as `""`.
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn selector_from_sentinel_and_empty() {
        assert_eq!(Selector::from("all"), Selector::All);
        assert_eq!(Selector::from(""), Selector::All);
        assert_eq!(Selector::from(" istat "), Selector::Only("istat".into()));
    }

    #[test]
    fn selector_value() {
        assert_eq!(Selector::All.value(), None);
        assert_eq!(Selector::from("ispra").value(), Some("ispra"));
        assert!(Selector::All.is_all());
    }

    #[test]
    fn filter_serializes_with_sentinels() {
        let filter = Filter::all().with_category("ambiente");
        let json = serde_json::to_value(&filter).expect("serialize");
        assert_eq!(json["source"], "all");
        assert_eq!(json["category"], "ambiente");
        assert!(json.get("dateFrom").is_none());
    }

    #[test]
    fn filter_accepts_empty_date_strings() {
        let json = r#"{"source":"all","category":"all","dateFrom":"","dateTo":"2024-02-01"}"#;
        let filter: Filter = serde_json::from_str(json).expect("deserialize");
        assert_eq!(filter.date_from, None);
        assert_eq!(filter.date_to, Some(date("2024-02-01")));
    }

    #[test]
    fn filter_rejects_malformed_date_strings() {
        let json = r#"{"dateFrom":"01/02/2024"}"#;
        assert!(serde_json::from_str::<Filter>(json).is_err());
    }

    #[test]
    fn source_filter_is_tagged_by_source() {
        let specific = SourceFilter::Gazzetta {
            series: Some("generale".into()),
            gazzette_number: Some("45".into()),
            year: None,
        };
        let json = serde_json::to_value(&specific).expect("serialize");
        assert_eq!(json["source"], "gazzetta");
        assert_eq!(json["gazzetteNumber"], "45");
        assert!(json.get("year").is_none());

        let decoded: SourceFilter = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded, specific);
    }

    #[test]
    fn source_filter_terms_skip_blank_fields() {
        let specific = SourceFilter::Normattiva {
            act_type: Some("  ".into()),
            act_number: Some(" 33 ".into()),
            year: Some("2013".into()),
        };
        assert_eq!(specific.terms(), vec!["33", "2013"]);
        assert!(specific.is_active());

        let inactive = SourceFilter::Ipa { organization: None };
        assert!(!inactive.is_active());
    }

    #[test]
    fn validate_rejects_reversed_range() {
        let filter = Filter::all().with_dates(Some(date("2024-02-01")), Some(date("2024-01-01")));
        let err = filter.validate().unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn validate_rejects_cross_source_refinement() {
        let filter = Filter::all()
            .with_source("gazzetta")
            .with_specific(SourceFilter::Ipa {
                organization: Some("comune".into()),
            });
        let err = filter.validate().unwrap_err();
        assert!(err.to_string().contains("ipa"));
    }

    #[test]
    fn validate_accepts_matching_refinement() {
        let filter = Filter::all()
            .with_source("ipa")
            .with_specific(SourceFilter::Ipa {
                organization: Some("comune".into()),
            });
        assert!(filter.validate().is_ok());
        assert!(Filter::all().validate().is_ok());
    }
}
