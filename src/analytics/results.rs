//! Distribution of a result set by source, category, date, and tag.

use std::collections::BTreeMap;

use chrono::Datelike;
use propa_search::query::predicates::{calendar_date, sort_by_date_desc};
use propa_search::{SearchResult, SourceRegistry};
use serde::Serialize;

use super::{category_or_default, percentage, tally};

/// Entries kept in the timeline.
const TIMELINE_LEN: usize = 10;

/// Tags kept in the ranking.
const TOP_TAGS: usize = 10;

const MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsAnalysis {
    pub total: usize,
    pub by_source: Vec<SourceShare>,
    pub by_category: Vec<CategoryShare>,
    pub by_date: DateDistribution,
    pub timeline: Vec<TimelineEntry>,
    pub top_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceShare {
    /// Source id.
    pub source: String,
    /// Display name, or the raw id for unknown sources.
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

/// Counts per calendar year and per month, both oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateDistribution {
    pub by_year: BTreeMap<i32, usize>,
    pub by_month: Vec<MonthCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    /// Italian label, e.g. `gennaio 2024`.
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub title: String,
    pub date: String,
    /// Source display name.
    pub source: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Analyse `results`. Returns `None` when there is nothing to analyse.
pub fn analyze_results(
    results: &[SearchResult],
    registry: &SourceRegistry,
) -> Option<ResultsAnalysis> {
    if results.is_empty() {
        return None;
    }
    let total = results.len();

    let by_source = tally(results.iter().map(|r| r.source.as_str()))
        .into_iter()
        .map(|(source, count)| SourceShare {
            source: source.to_owned(),
            name: registry.display_name(source),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    let by_category = tally(results.iter().map(|r| category_or_default(&r.category)))
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_owned(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    let top_tags = tally(results.iter().flat_map(|r| r.tags.iter().map(String::as_str)))
        .into_iter()
        .take(TOP_TAGS)
        .map(|(tag, count)| TagCount {
            tag: tag.to_owned(),
            count,
        })
        .collect();

    Some(ResultsAnalysis {
        total,
        by_source,
        by_category,
        by_date: date_distribution(results),
        timeline: timeline(results, registry),
        top_tags,
    })
}

fn date_distribution(results: &[SearchResult]) -> DateDistribution {
    let mut by_year = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();

    for result in results {
        let Some(date) = calendar_date(&result.date) else {
            tracing::debug!(id = %result.id, date = %result.date, "skipping unparseable date");
            continue;
        };
        *by_year.entry(date.year()).or_insert(0) += 1;
        *by_month.entry((date.year(), date.month0())).or_insert(0) += 1;
    }

    DateDistribution {
        by_year,
        by_month: by_month
            .into_iter()
            .map(|((year, month0), count)| MonthCount {
                label: format!("{} {year}", MONTHS_IT[month0 as usize]),
                count,
            })
            .collect(),
    }
}

fn timeline(results: &[SearchResult], registry: &SourceRegistry) -> Vec<TimelineEntry> {
    let mut sorted = results.to_vec();
    sort_by_date_desc(&mut sorted);
    sorted
        .into_iter()
        .take(TIMELINE_LEN)
        .map(|r| TimelineEntry {
            source: registry.display_name(&r.source),
            title: r.title,
            date: r.date,
            category: r.category,
        })
        .collect()
}
