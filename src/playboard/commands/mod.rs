//! # Command Layer
//!
//! This module contains the **core business logic** of playboard. Each command lives
//! in its own submodule and implements pure Rust functions that operate on a
//! [`LibraryState`](crate::model::LibraryState).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Implement the actual logic for each operation
//! - Mutate the document they are handed, and only that document
//! - Return structured `CmdResult` with affected games and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! Commands explicitly avoid:
//! - **Persistence**: The API clones the current document, runs the command on the
//!   clone, and saves the result. A command never touches the store.
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **User interaction**: No prompts, confirmations (return data, UI decides)
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. This struct carries:
//! - `affected_games`: Games that were created or modified
//! - `listed_games`: Games to display
//! - `messages`: Structured messages with levels (info, success, warning, error)
//! - `changed`: Whether the document was modified. Unchanged results are neither
//!   saved nor announced to subscribers.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run directly
//! against an in-memory `LibraryState`; no store is needed.
//!
//! ## Command Modules
//!
//! - [`add`]: Add a game to the backlog
//! - [`update`]: Merge partial changes into a game
//! - [`delete`]: Remove a game
//! - [`move_game`]: Move or reorder a game
//! - [`tags`]: Manage the tag registry
//! - [`list`]: Materialize columns and the filtered board
//! - [`doctor`]: Verify and repair document invariants
//! - [`config`]: Manage configuration
//! - [`helpers`]: Shared utilities (selector resolution, normalization)

use crate::config::BoardConfig;
use crate::model::{Game, GameMetadata, Platform};
use serde::Serialize;

pub use doctor::RepairReport;

pub mod add;
pub mod config;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod list;
pub mod move_game;
pub mod tags;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_games: Vec<Game>,
    pub listed_games: Vec<Game>,
    pub messages: Vec<CmdMessage>,
    pub changed: bool,
    pub config: Option<BoardConfig>,
    pub repair: Option<RepairReport>,
}

impl CmdResult {
    /// A result for a command that modified the document.
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_games(mut self, games: Vec<Game>) -> Self {
        self.affected_games = games;
        self
    }

    pub fn with_listed_games(mut self, games: Vec<Game>) -> Self {
        self.listed_games = games;
        self
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_repair(mut self, report: RepairReport) -> Self {
        self.repair = Some(report);
        self
    }

    /// Id of the first affected game; for `add` this is the new game's id.
    pub fn affected_id(&self) -> Option<&str> {
        self.affected_games.first().map(|g| g.id.as_str())
    }
}

/// Partial changes for `update`. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct GameUpdate {
    pub title: Option<String>,
    pub platforms: Option<Vec<Platform>>,
    /// `Some(None)` removes the attached metadata.
    pub metadata: Option<Option<GameMetadata>>,
    pub tags: Option<Vec<String>>,
}

impl GameUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<GameMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.platforms.is_none()
            && self.metadata.is_none()
            && self.tags.is_none()
    }
}
