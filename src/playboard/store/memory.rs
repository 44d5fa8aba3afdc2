use super::{encode_document, DocumentStore};
use crate::error::{BoardError, Result};
use crate::model::LibraryState;
use std::path::PathBuf;
use tracing::warn;

/// In-memory document store for testing.
///
/// The document is kept serialized so that every load goes through the same schema
/// check as the file store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Option<String>,
    saves: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with a raw document, valid or not.
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            document: Some(raw.into()),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw_document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self) -> Result<LibraryState> {
        let Some(raw) = &self.document else {
            return Ok(LibraryState::default());
        };
        match serde_json::from_str(raw) {
            Ok(state) => Ok(state),
            Err(err) => {
                warn!(error = %err, "in-memory document is unreadable, starting from an empty board");
                Ok(LibraryState::default())
            }
        }
    }

    fn save(&mut self, state: &LibraryState) -> Result<()> {
        if self.simulate_write_error {
            return Err(BoardError::Store("Simulated write error".to_string()));
        }
        self.document = Some(encode_document(state)?);
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://board.json")
    }
}
