//! # Storage Layer
//!
//! This module defines the storage abstraction for playboard. The [`DocumentStore`]
//! trait allows the application to work with different storage backends.
//!
//! ## One Document
//!
//! The entire library (games, columns, tags) is persisted as a single JSON document.
//! The store never sees individual mutations: the API reads the document once when it
//! opens, and after each mutation hands the store the complete new document to write.
//! Each write therefore replaces the previous document as a whole, and a reader never
//! observes a half-applied mutation.
//!
//! ## Schema Check on Load
//!
//! A document is validated by deserializing it into [`LibraryState`]. Missing optional
//! parts (the tag registry, a column) load as their defaults. A document that does not
//! match the schema at all is not an error for the caller: the store logs a warning,
//! moves the unreadable document aside (file store only) and loads the default state.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, `board.json` under the data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── board.json                  # The library document
//! ├── board.json.corrupt-<millis> # Unreadable documents moved aside on load
//! └── config.json                 # Configuration
//! ```

use crate::error::Result;
use crate::model::LibraryState;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for the persisted library document.
pub trait DocumentStore {
    /// Load the stored document, or the default state when there is none.
    fn load(&self) -> Result<LibraryState>;

    /// Replace the stored document with `state`.
    fn save(&mut self, state: &LibraryState) -> Result<()>;

    /// Where the document lives (a virtual path for non-file stores).
    fn location(&self) -> PathBuf;
}

pub(crate) fn encode_document(state: &LibraryState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}
