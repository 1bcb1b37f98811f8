//! Export and import of the user's history and bookmarks as one JSON document.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};
use crate::storage::{Bookmark, HistoryEntry, LocalStore};

/// Portable snapshot of local data.
///
/// On import, a missing section leaves the stored one untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<Vec<Bookmark>>,
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,
}

impl UserData {
    /// Read a document from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid document.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PortalError::Validation(format!("invalid data file {}: {e}", path.display())))
    }

    /// Write the document to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PortalError::Storage(format!("cannot encode export: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Snapshot everything in `store`.
pub fn export_data(store: &LocalStore) -> UserData {
    UserData {
        history: Some(store.list_history()),
        bookmarks: Some(store.list_bookmarks()),
        exported_at: Utc::now(),
    }
}

/// Replace each section of `store` that `data` carries.
///
/// # Errors
///
/// Returns the first storage error. A history written before a failing
/// bookmark write stays written.
pub fn import_data(store: &LocalStore, data: UserData) -> Result<()> {
    if let Some(history) = data.history {
        tracing::info!(count = history.len(), "importing history");
        store.replace_history(history)?;
    }
    if let Some(bookmarks) = data.bookmarks {
        tracing::info!(count = bookmarks.len(), "importing bookmarks");
        store.replace_bookmarks(bookmarks)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::storage::MemoryBlobStore;
    use propa_search::Filter;
    use propa_search::fixtures::bundled_results;
    use std::sync::Arc;

    fn populated() -> LocalStore {
        let store = LocalStore::in_memory();
        store.add_history("aria", &Filter::all());
        store.add_history("bilanci", &Filter::all().with_category("economia"));
        store.add_bookmark(&bundled_results().remove(0));
        store
    }

    #[test]
    fn export_then_import_restores_everything() {
        let source = populated();
        let data = export_data(&source);

        let target = LocalStore::in_memory();
        import_data(&target, data).expect("import");
        assert_eq!(target.list_history(), source.list_history());
        assert_eq!(target.list_bookmarks(), source.list_bookmarks());
    }

    #[test]
    fn missing_sections_are_left_alone() {
        let store = populated();
        let data: UserData =
            serde_json::from_str(r#"{"history": []}"#).expect("partial document");
        import_data(&store, data).expect("import");
        assert!(store.list_history().is_empty());
        assert_eq!(store.list_bookmarks().len(), 1);
    }

    #[test]
    fn imported_history_is_capped() {
        let source = LocalStore::new(Arc::new(MemoryBlobStore::new()), 10);
        for i in 0..10 {
            source.add_history(&format!("q{i}"), &Filter::all());
        }
        let target = LocalStore::new(Arc::new(MemoryBlobStore::new()), 4);
        import_data(&target, export_data(&source)).expect("import");
        assert_eq!(target.list_history().len(), 4);
        assert_eq!(target.list_history()[0].query, "q9");
    }

    #[test]
    fn failed_import_is_reported() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let store = LocalStore::new(blobs.clone(), 50);
        blobs.set_fail_writes(true);
        let err = import_data(&store, export_data(&populated())).unwrap_err();
        assert!(matches!(err, PortalError::Storage(_)));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export").join("propa-data.json");
        let data = export_data(&populated());
        data.save_to_file(&path).expect("save");
        assert_eq!(UserData::from_file(&path).expect("load"), data);
    }

    #[test]
    fn garbage_file_is_validation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]").expect("write");
        assert!(matches!(
            UserData::from_file(&path),
            Err(PortalError::Validation(_))
        ));
    }
}
