//! Propa: one search box over Italian public-administration open data.
//!
//! The search itself (source catalogue, fixtures, dati.gov.it adapter, query
//! engine) lives in the `propa-search` crate. This crate adds what a user of
//! the portal sees around it:
//!
//! # Architecture
//!
//! - **Portal**: the service object wiring the engine to local storage;
//!   validates input and records history
//! - **Storage**: search history and bookmarks as JSON blobs on disk
//! - **Analytics**: distributions over results, history, and bookmarks
//! - **Guide**: recommends a source from two guided answers
//! - **Transfer**: export and import of local data as one JSON document
//! - **Config**: `config.toml` with `[search]` and `[storage]` sections

pub mod analytics;
pub mod config;
pub mod error;
pub mod guide;
pub mod portal;
pub mod propa_dirs;
pub mod storage;
pub mod transfer;

pub use config::PortalConfig;
pub use error::{PortalError, Result};
pub use portal::Portal;
pub use storage::{Bookmark, HistoryEntry, LocalStore};
pub use transfer::UserData;
