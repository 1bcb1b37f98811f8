//! Local persistence of search history and bookmarks.
//!
//! Each concern is one JSON array under its own key in a [`BlobStore`].
//! Reads never fail from the caller's point of view: a missing, unreadable,
//! or corrupt blob is logged and treated as empty. Mutations skip the write
//! when the blob cannot be read, so an unreadable blob is never replaced; a
//! corrupt one is overwritten. Writes that fail are logged and leave the
//! previously persisted state in place.

pub mod blob;
pub mod bookmarks;
pub mod history;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::DEFAULT_HISTORY_CAP;
use crate::error::{PortalError, Result};

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use bookmarks::Bookmark;
pub use history::HistoryEntry;

/// Key of the history blob.
pub const HISTORY_KEY: &str = "propa_search_history";

/// Key of the bookmarks blob.
pub const BOOKMARKS_KEY: &str = "propa_bookmarks";

/// Counts of persisted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub history_count: usize,
    pub bookmarks_count: usize,
}

/// History and bookmark store over a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct LocalStore {
    blobs: Arc<dyn BlobStore>,
    history_cap: usize,
}

impl LocalStore {
    /// Wrap an existing blob backend.
    pub fn new(blobs: Arc<dyn BlobStore>, history_cap: usize) -> Self {
        Self { blobs, history_cap }
    }

    /// File-backed store rooted at `dir`.
    pub fn open(dir: &Path, history_cap: usize) -> Self {
        tracing::debug!(dir = %dir.display(), "opening local store");
        Self::new(Arc::new(FileBlobStore::new(dir)), history_cap)
    }

    /// Volatile store with the default history cap.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBlobStore::new()), DEFAULT_HISTORY_CAP)
    }

    /// Maximum number of history entries retained.
    pub fn history_cap(&self) -> usize {
        self.history_cap
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            history_count: self.list_history().len(),
            bookmarks_count: self.list_bookmarks().len(),
        }
    }

    /// Decode the array under `key`, treating any failure as empty.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.load_for_update(key).unwrap_or_default()
    }

    /// Decode the array under `key` ahead of a mutation.
    ///
    /// A missing or corrupt blob decodes as empty. A blob that cannot be
    /// read at all is an error, and the caller must not write.
    fn load_for_update<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let raw = match self.blobs.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(key, error = %e, "cannot read blob");
                return Err(e);
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::error!(key, error = %e, "corrupt blob, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Encode and persist `items` under `key`.
    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)
            .map_err(|e| PortalError::Storage(format!("cannot encode {key}: {e}")))?;
        self.blobs.write(key, &json)
    }

    /// [`Self::save`], logging instead of returning the error.
    fn save_logged<T: Serialize>(&self, key: &str, items: &[T]) -> bool {
        match self.save(key, items) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "cannot persist blob");
                false
            }
        }
    }
}
