//! Search-history patterns.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::tally;
use crate::storage::HistoryEntry;

/// Window for recent activity, in days.
const RECENT_DAYS: i64 = 7;

const TOP_TERMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalysis {
    pub total_searches: usize,
    pub recent_activity: RecentActivity,
    pub top_search_terms: Vec<TermCount>,
    /// Searches per UTC day, oldest first.
    pub search_frequency: BTreeMap<NaiveDate, usize>,
    pub filter_usage: FilterUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    /// Searches in the last seven days.
    pub count: usize,
    /// `count / 7`, one decimal.
    pub average_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// How often each kind of restriction was used.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUsage {
    pub source_filters: BTreeMap<String, usize>,
    pub category_filters: BTreeMap<String, usize>,
    /// Searches with at least one date bound.
    pub date_range_usage: usize,
}

/// Analyse `history` as of `now`. Returns `None` for an empty history.
pub fn analyze_history(history: &[HistoryEntry], now: DateTime<Utc>) -> Option<HistoryAnalysis> {
    if history.is_empty() {
        return None;
    }

    let cutoff = now - Duration::days(RECENT_DAYS);
    let recent = history.iter().filter(|e| e.timestamp > cutoff).count();

    let lowered: Vec<String> = history.iter().map(|e| e.query.to_lowercase()).collect();
    let top_search_terms = tally(lowered.iter().map(String::as_str))
        .into_iter()
        .take(TOP_TERMS)
        .map(|(term, count)| TermCount {
            term: term.to_owned(),
            count,
        })
        .collect();

    let mut search_frequency = BTreeMap::new();
    for entry in history {
        *search_frequency.entry(entry.timestamp.date_naive()).or_insert(0) += 1;
    }

    Some(HistoryAnalysis {
        total_searches: history.len(),
        recent_activity: RecentActivity {
            count: recent,
            average_per_day: (recent as f64 * 10.0 / RECENT_DAYS as f64).round() / 10.0,
        },
        top_search_terms,
        search_frequency,
        filter_usage: filter_usage(history),
    })
}

fn filter_usage(history: &[HistoryEntry]) -> FilterUsage {
    let mut usage = FilterUsage::default();
    for entry in history {
        let filters = &entry.filters;
        if let Some(source) = filters.source.value() {
            *usage.source_filters.entry(source.to_owned()).or_insert(0) += 1;
        }
        if let Some(category) = filters.category.value() {
            *usage.category_filters.entry(category.to_owned()).or_insert(0) += 1;
        }
        if filters.has_date_bounds() {
            usage.date_range_usage += 1;
        }
    }
    usage
}
