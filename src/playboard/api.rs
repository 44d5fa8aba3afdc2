//! # API Facade
//!
//! The API layer is the single entry point for all playboard operations, regardless
//! of the UI being used. It owns the in-memory mirror of the library document and is
//! the only code that writes it back to the store.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Commits** mutations: clone the current document, run the command on the clone,
//!   save the clone, then swap it in as the new snapshot
//! - **Publishes** every committed snapshot to subscribers
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! A mutation that fails, or whose save fails, leaves the snapshot exactly as it was.
//! A mutation that changes nothing is neither saved nor published.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over DocumentStore
//!
//! `BoardApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `BoardApi<FileStore>`
//! - Testing: `BoardApi<InMemoryStore>`
//!
//! ## Snapshots
//!
//! Readers get an `Arc<LibraryState>`. A snapshot never changes after it is handed
//! out; a later mutation produces a new one.

use crate::commands::{self, doctor, list, tags, CmdResult, GameUpdate};
use crate::error::Result;
use crate::filter::TagFilter;
use crate::model::{ColumnId, Game, GameMetadata, LibraryState, Platform};
use crate::reorder::{DropOutcome, DropTarget, ReorderEngine};
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&Arc<LibraryState>)>;

/// The main API facade for playboard operations.
pub struct BoardApi<S: DocumentStore> {
    store: S,
    data_dir: PathBuf,
    snapshot: Arc<LibraryState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<S: DocumentStore> BoardApi<S> {
    /// Loads the document from `store`. Invariant violations are logged, not repaired;
    /// see [`BoardApi::doctor`].
    pub fn open(store: S, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let state = store.load()?;

        let mut probe = state.clone();
        let report = doctor::repair(&mut probe);
        if !report.is_clean() {
            warn!(
                dangling = report.dangling_ids.len(),
                duplicates = report.duplicate_listings,
                relocated = report.relocated.len(),
                unlisted = report.reattached.len(),
                "Library document is inconsistent, run `playboard doctor` to repair it"
            );
        }
        debug!(
            games = state.games.len(),
            location = %store.location().display(),
            "Opened library"
        );

        Ok(Self {
            store,
            data_dir: data_dir.into(),
            snapshot: Arc::new(state),
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn snapshot(&self) -> Arc<LibraryState> {
        Arc::clone(&self.snapshot)
    }

    pub fn location(&self) -> PathBuf {
        self.store.location()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Registers `listener` to receive every committed snapshot.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<LibraryState>) + 'static,
    {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn add_game(
        &mut self,
        title: &str,
        platforms: Vec<Platform>,
        metadata: Option<GameMetadata>,
        tags: Vec<String>,
    ) -> Result<CmdResult> {
        self.commit("add_game", |state| {
            commands::add::run(state, title, platforms, metadata, tags)
        })
    }

    pub fn update_game(&mut self, id: &str, update: GameUpdate) -> Result<CmdResult> {
        self.commit("update_game", |state| commands::update::run(state, id, update))
    }

    pub fn delete_game(&mut self, id: &str) -> Result<CmdResult> {
        self.commit("delete_game", |state| commands::delete::run(state, id))
    }

    pub fn move_game(&mut self, id: &str, column: ColumnId, index: usize) -> Result<CmdResult> {
        self.commit("move_game", |state| {
            commands::move_game::run(state, id, column, index)
        })
    }

    pub fn add_tag(&mut self, name: &str) -> Result<CmdResult> {
        self.commit("add_tag", |state| tags::add_tag(state, name))
    }

    pub fn delete_tag(&mut self, name: &str) -> Result<CmdResult> {
        self.commit("delete_tag", |state| tags::delete_tag(state, name))
    }

    pub fn list_tags(&self) -> Vec<tags::TagUsage> {
        tags::list_tags(&self.snapshot)
    }

    pub fn games_for_column(&self, column: ColumnId) -> Vec<Game> {
        list::games_for_column(&self.snapshot, column)
    }

    pub fn board(&self, filter: &TagFilter) -> list::BoardView {
        list::board(&self.snapshot, filter)
    }

    pub fn list(&self, column: Option<ColumnId>, filter: &TagFilter) -> Result<CmdResult> {
        list::run(&self.snapshot, column, filter)
    }

    /// Resolves a user-typed selector (id, id prefix or title) to one game.
    pub fn find_game(&self, selector: &str) -> Result<Game> {
        commands::helpers::resolve_game(&self.snapshot, selector).cloned()
    }

    /// Checks the document invariants and saves the repaired document if anything
    /// was wrong.
    pub fn doctor(&mut self) -> Result<CmdResult> {
        self.commit("doctor", commands::doctor::run)
    }

    /// Releases the drag held by `engine` over `target`, applying the resulting move.
    pub fn commit_drop(
        &mut self,
        engine: &mut ReorderEngine,
        target: &DropTarget,
    ) -> Result<DropOutcome> {
        let outcome = engine.release(&self.snapshot, target);
        if let DropOutcome::Moved(request) = &outcome {
            self.move_game(&request.game_id, request.column, request.index)?;
        }
        Ok(outcome)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    fn commit<F>(&mut self, operation: &str, op: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut LibraryState) -> Result<CmdResult>,
    {
        let mut draft = LibraryState::clone(&self.snapshot);
        let result = op(&mut draft)?;
        if !result.changed {
            debug!(operation, "Nothing changed");
            return Ok(result);
        }

        self.store.save(&draft)?;
        self.snapshot = Arc::new(draft);
        debug!(operation, games = self.snapshot.games.len(), "Committed");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.snapshot);
        }
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::{BoardView, ColumnView};
pub use crate::commands::tags::TagUsage;
pub use crate::commands::{CmdMessage, MessageLevel, RepairReport};
