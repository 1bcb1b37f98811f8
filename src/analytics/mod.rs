//! Grouping and counting over results, history, and bookmarks.
//!
//! Every analysis is a pure function of its input and returns `None` for an
//! empty input. Ranked lists order by count descending; ties keep the order
//! in which keys were first seen.

pub mod bookmarks;
pub mod history;
pub mod results;

use chrono::{DateTime, Utc};
use propa_search::{SearchResult, SourceRegistry};
use serde::Serialize;

use crate::storage::{Bookmark, HistoryEntry};

pub use bookmarks::{BookmarkAnalysis, analyze_bookmarks};
pub use history::{HistoryAnalysis, analyze_history};
pub use results::{ResultsAnalysis, analyze_results};

/// Category label used when a record has none.
pub const UNCATEGORIZED: &str = "altro";

/// The three analyses together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    pub results: Option<ResultsAnalysis>,
    pub history: Option<HistoryAnalysis>,
    pub bookmarks: Option<BookmarkAnalysis>,
    pub generated_at: DateTime<Utc>,
}

/// Combine all analyses as of `now`.
pub fn full_report(
    results: &[SearchResult],
    history: &[HistoryEntry],
    bookmarks: &[Bookmark],
    registry: &SourceRegistry,
    now: DateTime<Utc>,
) -> FullReport {
    FullReport {
        results: analyze_results(results, registry),
        history: analyze_history(history, now),
        bookmarks: analyze_bookmarks(bookmarks, registry),
        generated_at: now,
    }
}

/// Count occurrences of each key, most frequent first.
pub(crate) fn tally<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// `count` as a share of `total`, in percent, rounded to one decimal.
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

/// A record's category, or [`UNCATEGORIZED`] when blank.
pub(crate) fn category_or_default(category: &str) -> &str {
    if category.trim().is_empty() {
        UNCATEGORIZED
    } else {
        category
    }
}
