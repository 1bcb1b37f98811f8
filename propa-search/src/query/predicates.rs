//! Filter predicates, applied in a fixed order.
//!
//! Free text → source → category → date lower bound → date upper bound →
//! source-specific refinement. Each stage only ever removes records.

use chrono::NaiveDate;

use crate::config::DatePolicy;
use crate::filter::{Filter, SourceFilter};
use crate::types::SearchResult;

/// Narrow `results` by `query` and `filter`.
///
/// A blank query disables only the free-text stage.
pub fn apply_filters(
    mut results: Vec<SearchResult>,
    query: &str,
    filter: &Filter,
    policy: DatePolicy,
) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if !needle.is_empty() {
        results.retain(|r| matches_text(r, &needle));
    }

    if let Some(source) = filter.source.value() {
        results.retain(|r| r.source == source);
    }

    if let Some(category) = filter.category.value() {
        results.retain(|r| matches_category(r, category));
    }

    if let Some(from) = filter.date_from.map(iso_date) {
        results.retain(|r| within_bound(r, policy, |d| d >= from.as_str()));
    }

    if let Some(to) = filter.date_to.map(iso_date) {
        results.retain(|r| within_bound(r, policy, |d| d <= to.as_str()));
    }

    if let Some(specific) = filter.specific.as_ref().filter(|s| s.is_active()) {
        results.retain(|r| matches_specific(r, specific));
    }

    results
}

/// Newest first; records with equal date strings keep their relative order.
pub fn sort_by_date_desc(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Case-insensitive substring match on title, description, or any tag.
///
/// `needle` must already be lowercased.
pub fn matches_text(result: &SearchResult, needle: &str) -> bool {
    result.title.to_lowercase().contains(needle)
        || result.description.to_lowercase().contains(needle)
        || result
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Category equality, or exact membership in the tag list.
pub fn matches_category(result: &SearchResult, category: &str) -> bool {
    result.category == category || result.tags.iter().any(|t| t == category)
}

/// The calendar date of a record, read from its `YYYY-MM-DD` prefix.
pub fn calendar_date(date: &str) -> Option<NaiveDate> {
    let prefix = date.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Bounds compare the raw date string lexicographically, so a timestamp on
/// the upper bound's day sorts after it and is excluded.
fn within_bound(result: &SearchResult, policy: DatePolicy, test: impl Fn(&str) -> bool) -> bool {
    match calendar_date(&result.date) {
        Some(_) => test(&result.date),
        None => {
            tracing::debug!(
                id = %result.id,
                date = %result.date,
                ?policy,
                "unparseable date under active date bound"
            );
            policy == DatePolicy::Keep
        }
    }
}

/// Records of other sources never match an active refinement; records of the
/// refinement's source must contain every term.
pub fn matches_specific(result: &SearchResult, specific: &SourceFilter) -> bool {
    if result.source != specific.source_id() {
        return false;
    }
    let haystack = searchable_text(result);
    specific
        .terms()
        .iter()
        .all(|term| haystack.contains(&term.to_lowercase()))
}

fn searchable_text(result: &SearchResult) -> String {
    let mut text = [
        result.title.as_str(),
        result.description.as_str(),
        result.url.as_str(),
        result.date.as_str(),
    ]
    .join("\n");
    for tag in &result.tags {
        text.push('\n');
        text.push_str(tag);
    }
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bundled_results;
    use crate::types::ResultId;

    fn ids(results: &[SearchResult]) -> Vec<i64> {
        results
            .iter()
            .map(|r| match r.id {
                ResultId::Number(n) => n,
                ResultId::Text(_) => -1,
            })
            .collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn with_date(id: i64, d: &str) -> SearchResult {
        let mut r = bundled_results().remove(0);
        r.id = ResultId::Number(id);
        r.date = d.to_owned();
        r
    }

    #[test]
    fn text_match_is_case_insensitive_over_tags() {
        let results = apply_filters(bundled_results(), "pnrr", &Filter::all(), DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![4]);
    }

    #[test]
    fn text_match_hits_tag_only_records() {
        // "PNRR" is a tag of record 4 but not in its title.
        let record = bundled_results().remove(3);
        assert!(!record.title.contains("PNRR"));
        assert!(matches_text(&record, "pnrr"));
    }

    #[test]
    fn blank_query_keeps_everything() {
        let results = apply_filters(bundled_results(), "   ", &Filter::all(), DatePolicy::Exclude);
        assert_eq!(results.len(), 20);
    }

    #[test]
    fn source_and_category_narrow() {
        let filter = Filter::all().with_source("datigov").with_category("economia");
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![6]);
    }

    #[test]
    fn category_matches_exact_tag() {
        // Record 13 has category "economia" but carries "territorio" as a tag.
        let filter = Filter::all().with_category("territorio");
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![13, 14, 20]);
    }

    #[test]
    fn category_tag_match_is_exact() {
        let filter = Filter::all().with_category("territori");
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert!(results.is_empty());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = Filter::all().with_dates(Some(date("2024-02-01")), Some(date("2024-02-10")));
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![3, 14, 15, 17, 20]);
        for r in &results {
            assert!(r.date.as_str() >= "2024-02-01" && r.date.as_str() <= "2024-02-10");
        }
    }

    #[test]
    fn timestamps_compare_as_iso_strings() {
        let records = vec![
            with_date(1, "2024-02-10T23:59:59"),
            with_date(2, "2024-02-10"),
            with_date(3, "2024-02-11"),
        ];

        let upper = Filter::all().with_dates(None, Some(date("2024-02-10")));
        let results = apply_filters(records.clone(), "", &upper, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![2]);

        let lower = Filter::all().with_dates(Some(date("2024-02-10")), None);
        let results = apply_filters(records, "", &lower, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![1, 2, 3]);
    }

    #[test]
    fn unparseable_dates_follow_policy() {
        let records = vec![with_date(1, "sconosciuta"), with_date(2, "2024-01-01")];
        let filter = Filter::all().with_dates(Some(date("2023-01-01")), None);

        let excluded = apply_filters(records.clone(), "", &filter, DatePolicy::Exclude);
        assert_eq!(ids(&excluded), vec![2]);

        let kept = apply_filters(records.clone(), "", &filter, DatePolicy::Keep);
        assert_eq!(ids(&kept), vec![1, 2]);

        let unbounded = apply_filters(records, "", &Filter::all(), DatePolicy::Exclude);
        assert_eq!(unbounded.len(), 2);
    }

    #[test]
    fn specific_refinement_excludes_other_sources() {
        let filter = Filter::all().with_specific(SourceFilter::Normattiva {
            act_type: Some("decreto legislativo".into()),
            act_number: Some("33".into()),
            year: None,
        });
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert_eq!(ids(&results), vec![2]);
    }

    #[test]
    fn specific_refinement_requires_every_term() {
        let filter = Filter::all().with_specific(SourceFilter::Gazzetta {
            series: Some("serie generale".into()),
            gazzette_number: Some("n.45".into()),
            year: Some("2023".into()),
        });
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert!(results.is_empty());
    }

    #[test]
    fn inactive_refinement_is_ignored() {
        let filter = Filter::all().with_specific(SourceFilter::Ipa { organization: None });
        let results = apply_filters(bundled_results(), "", &filter, DatePolicy::Exclude);
        assert_eq!(results.len(), 20);
    }

    #[test]
    fn sort_is_newest_first_and_stable() {
        let mut records = vec![
            with_date(1, "2023-01-01"),
            with_date(2, "2024-05-05"),
            with_date(3, "2023-01-01"),
        ];
        sort_by_date_desc(&mut records);
        assert_eq!(ids(&records), vec![2, 1, 3]);
    }

    #[test]
    fn calendar_date_reads_prefix() {
        assert_eq!(calendar_date("2024-01-15"), Some(date("2024-01-15")));
        assert_eq!(calendar_date("2024-01-15T10:00:00"), Some(date("2024-01-15")));
        assert_eq!(calendar_date("2024-13-01"), None);
        assert_eq!(calendar_date("2024"), None);
    }
}
