//! Bookmark breakdown.

use chrono::{DateTime, Utc};
use propa_search::SourceRegistry;
use serde::Serialize;

use super::{category_or_default, tally};
use crate::storage::Bookmark;

const MOST_RECENT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkAnalysis {
    pub total: usize,
    pub by_source: Vec<SourceCount>,
    pub by_category: Vec<CategoryCount>,
    /// The newest bookmarks, newest first.
    pub most_recent: Vec<RecentBookmark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBookmark {
    pub title: String,
    /// Source display name.
    pub source: String,
    pub bookmarked_at: DateTime<Utc>,
}

/// Analyse `bookmarks`, which are stored newest first.
pub fn analyze_bookmarks(
    bookmarks: &[Bookmark],
    registry: &SourceRegistry,
) -> Option<BookmarkAnalysis> {
    if bookmarks.is_empty() {
        return None;
    }

    let by_source = tally(bookmarks.iter().map(|b| b.result.source.as_str()))
        .into_iter()
        .map(|(source, count)| SourceCount {
            source: source.to_owned(),
            name: registry.display_name(source),
            count,
        })
        .collect();

    let by_category = tally(bookmarks.iter().map(|b| category_or_default(&b.result.category)))
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect();

    let most_recent = bookmarks
        .iter()
        .take(MOST_RECENT)
        .map(|b| RecentBookmark {
            title: b.result.title.clone(),
            source: registry.display_name(&b.result.source),
            bookmarked_at: b.bookmarked_at,
        })
        .collect();

    Some(BookmarkAnalysis {
        total: bookmarks.len(),
        by_source,
        by_category,
        most_recent,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use propa_search::fixtures::bundled_results;

    fn bookmarks() -> Vec<Bookmark> {
        bundled_results()
            .into_iter()
            .take(7)
            .enumerate()
            .map(|(i, result)| Bookmark {
                result,
                bookmarked_at: DateTime::from_timestamp(1_700_000_000 - i as i64 * 60, 0)
                    .expect("valid timestamp"),
            })
            .collect()
    }

    #[test]
    fn empty_bookmarks_have_no_analysis() {
        assert!(analyze_bookmarks(&[], &SourceRegistry::bundled()).is_none());
    }

    #[test]
    fn counts_by_source_and_category() {
        let a = analyze_bookmarks(&bookmarks(), &SourceRegistry::bundled()).expect("non-empty");
        assert_eq!(a.total, 7);
        let sources: usize = a.by_source.iter().map(|s| s.count).sum();
        let categories: usize = a.by_category.iter().map(|c| c.count).sum();
        assert_eq!(sources, 7);
        assert_eq!(categories, 7);
        assert_eq!(a.by_source[0].source, "datigov");
        assert_eq!(a.by_source[0].name, "Dati.gov.it");
    }

    #[test]
    fn most_recent_keeps_stored_order() {
        let list = bookmarks();
        let a = analyze_bookmarks(&list, &SourceRegistry::bundled()).expect("non-empty");
        assert_eq!(a.most_recent.len(), 5);
        assert_eq!(a.most_recent[0].title, list[0].result.title);
        assert_eq!(a.most_recent[0].bookmarked_at, list[0].bookmarked_at);
    }
}
