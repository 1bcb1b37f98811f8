//! Bookmarks: saved results, unique by id, newest first.

use chrono::{DateTime, Utc};
use propa_search::{ResultId, SearchResult};
use serde::{Deserialize, Serialize};

use super::{BOOKMARKS_KEY, LocalStore};
use crate::error::Result;

/// A saved result.
///
/// Serialized flat: the result's fields plus `bookmarkedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(flatten)]
    pub result: SearchResult,
    pub bookmarked_at: DateTime<Utc>,
}

impl LocalStore {
    /// Save `result` unless a bookmark with its id exists.
    ///
    /// Returns `true` if the bookmark was added and persisted.
    pub fn add_bookmark(&self, result: &SearchResult) -> bool {
        let Ok(mut bookmarks) = self.load_for_update::<Bookmark>(BOOKMARKS_KEY) else {
            return false;
        };
        if bookmarks.iter().any(|b| b.result.id == result.id) {
            return false;
        }
        bookmarks.insert(
            0,
            Bookmark {
                result: result.clone(),
                bookmarked_at: Utc::now(),
            },
        );
        self.save_logged(BOOKMARKS_KEY, &bookmarks)
    }

    /// Remove the bookmark with `id`. Returns `true` if one was removed and
    /// the change was persisted.
    pub fn remove_bookmark(&self, id: &ResultId) -> bool {
        let Ok(mut bookmarks) = self.load_for_update::<Bookmark>(BOOKMARKS_KEY) else {
            return false;
        };
        let before = bookmarks.len();
        bookmarks.retain(|b| &b.result.id != id);
        if bookmarks.len() == before {
            return false;
        }
        self.save_logged(BOOKMARKS_KEY, &bookmarks)
    }

    /// Flip the bookmark state of `result`.
    ///
    /// Returns whether `result` is bookmarked afterwards. If the change
    /// cannot be persisted the state is unchanged and so is the answer. An
    /// unreadable bookmark blob is left as it is and reported as `false`.
    pub fn toggle_bookmark(&self, result: &SearchResult) -> bool {
        let Ok(bookmarks) = self.load_for_update::<Bookmark>(BOOKMARKS_KEY) else {
            return false;
        };
        if bookmarks.iter().any(|b| b.result.id == result.id) {
            let removed = self.remove_bookmark(&result.id);
            tracing::debug!(id = %result.id, removed, "bookmark toggled off");
            !removed
        } else {
            let added = self.add_bookmark(result);
            tracing::debug!(id = %result.id, added, "bookmark toggled on");
            added
        }
    }

    pub fn is_bookmarked(&self, id: &ResultId) -> bool {
        self.list_bookmarks().iter().any(|b| &b.result.id == id)
    }

    /// All bookmarks, most recently saved first.
    pub fn list_bookmarks(&self) -> Vec<Bookmark> {
        self.load(BOOKMARKS_KEY)
    }

    /// Replace every bookmark.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the bookmarks cannot be persisted.
    pub fn replace_bookmarks(&self, bookmarks: Vec<Bookmark>) -> Result<()> {
        self.save(BOOKMARKS_KEY, &bookmarks)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::storage::MemoryBlobStore;
    use propa_search::fixtures::bundled_results;
    use std::sync::Arc;

    #[test]
    fn toggle_twice_restores_state() {
        let store = LocalStore::in_memory();
        let result = bundled_results().remove(0);

        assert!(!store.is_bookmarked(&result.id));
        assert!(store.toggle_bookmark(&result));
        assert!(store.is_bookmarked(&result.id));
        assert!(!store.toggle_bookmark(&result));
        assert!(!store.is_bookmarked(&result.id));
        assert!(store.list_bookmarks().is_empty());
    }

    #[test]
    fn add_is_unique_by_id() {
        let store = LocalStore::in_memory();
        let result = bundled_results().remove(2);
        assert!(store.add_bookmark(&result));
        assert!(!store.add_bookmark(&result));
        assert_eq!(store.list_bookmarks().len(), 1);
    }

    #[test]
    fn newest_bookmark_first() {
        let store = LocalStore::in_memory();
        let mut results = bundled_results();
        let first = results.remove(0);
        let second = results.remove(0);
        store.add_bookmark(&first);
        store.add_bookmark(&second);

        let ids: Vec<ResultId> = store
            .list_bookmarks()
            .into_iter()
            .map(|b| b.result.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn remove_missing_is_false() {
        let store = LocalStore::in_memory();
        assert!(!store.remove_bookmark(&ResultId::Number(99)));
    }

    #[test]
    fn failed_write_reports_unchanged_state() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let store = LocalStore::new(blobs.clone(), 50);
        let result = bundled_results().remove(0);

        blobs.set_fail_writes(true);
        assert!(!store.toggle_bookmark(&result));
        assert!(!store.is_bookmarked(&result.id));

        blobs.set_fail_writes(false);
        assert!(store.toggle_bookmark(&result));
        blobs.set_fail_writes(true);
        assert!(store.toggle_bookmark(&result));
        assert!(store.is_bookmarked(&result.id));
    }

    #[test]
    fn unreadable_bookmarks_are_not_overwritten() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let store = LocalStore::new(blobs.clone(), 50);
        let mut results = bundled_results();
        let saved = results.remove(0);
        let other = results.remove(0);
        assert!(store.add_bookmark(&saved));

        blobs.set_fail_reads(true);
        assert!(!store.add_bookmark(&other));
        assert!(!store.toggle_bookmark(&other));
        assert!(!store.remove_bookmark(&saved.id));

        blobs.set_fail_reads(false);
        let ids: Vec<ResultId> = store.list_bookmarks().into_iter().map(|b| b.result.id).collect();
        assert_eq!(ids, vec![saved.id]);
    }

    #[test]
    fn bookmark_serializes_flat() {
        let bookmark = Bookmark {
            result: bundled_results().remove(0),
            bookmarked_at: DateTime::from_timestamp(0, 0).expect("epoch"),
        };
        let json = serde_json::to_value(&bookmark).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["source"], "datigov");
        assert_eq!(json["bookmarkedAt"], "1970-01-01T00:00:00Z");

        let decoded: Bookmark = serde_json::from_value(json).expect("deserialize");
        assert_eq!(decoded, bookmark);
    }
}
