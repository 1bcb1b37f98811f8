//! Search history: most recent first, capped.

use chrono::{DateTime, Utc};
use propa_search::Filter;
use serde::{Deserialize, Serialize};

use super::{HISTORY_KEY, LocalStore};
use crate::error::Result;

/// One past search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond timestamp of creation, unique within the history.
    pub id: i64,
    /// The query as searched.
    pub query: String,
    /// The filter in effect.
    #[serde(default)]
    pub filters: Filter,
    /// When the search ran.
    pub timestamp: DateTime<Utc>,
}

impl LocalStore {
    /// Record a search now. See [`Self::add_history_at`].
    pub fn add_history(&self, query: &str, filter: &Filter) -> HistoryEntry {
        self.add_history_at(query, filter, Utc::now())
    }

    /// Prepend an entry stamped `at` and trim to the history cap.
    ///
    /// The id is the millisecond timestamp, bumped past the newest existing
    /// id when two searches land in the same millisecond. The entry is
    /// returned even if it cannot be persisted, including when the existing
    /// history is unreadable and is left as it is.
    pub fn add_history_at(&self, query: &str, filter: &Filter, at: DateTime<Utc>) -> HistoryEntry {
        let loaded = self.load_for_update::<HistoryEntry>(HISTORY_KEY);
        let id = match loaded.as_ref().ok().and_then(|h| h.first()) {
            Some(newest) => at.timestamp_millis().max(newest.id.saturating_add(1)),
            None => at.timestamp_millis(),
        };
        let entry = HistoryEntry {
            id,
            query: query.to_owned(),
            filters: filter.clone(),
            timestamp: at,
        };

        let Ok(mut history) = loaded else {
            return entry;
        };
        history.insert(0, entry.clone());
        history.truncate(self.history_cap);
        if self.save_logged(HISTORY_KEY, &history) {
            tracing::debug!(id, count = history.len(), "history entry added");
        }
        entry
    }

    /// All entries, most recent first.
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.load(HISTORY_KEY)
    }

    /// Delete the entry with `id`. Returns `true` if it existed and the
    /// change was persisted.
    pub fn delete_history(&self, id: i64) -> bool {
        let Ok(mut history) = self.load_for_update::<HistoryEntry>(HISTORY_KEY) else {
            return false;
        };
        let before = history.len();
        history.retain(|e| e.id != id);
        if history.len() == before {
            return false;
        }
        self.save_logged(HISTORY_KEY, &history)
    }

    /// Remove every entry.
    pub fn clear_history(&self) {
        if let Err(e) = self.blobs.remove(HISTORY_KEY) {
            tracing::error!(error = %e, "cannot clear history");
        }
    }

    /// Replace the whole history, trimmed to the cap.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the history cannot be persisted.
    pub fn replace_history(&self, mut entries: Vec<HistoryEntry>) -> Result<()> {
        entries.truncate(self.history_cap);
        self.save(HISTORY_KEY, &entries)
    }
}
