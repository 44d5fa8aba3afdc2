//! # Domain Model
//!
//! This module defines the core data structures for playboard: [`Game`], [`Column`],
//! [`LibraryState`] and the two closed vocabularies, [`ColumnId`] and [`Platform`].
//!
//! ## The Document
//!
//! The whole library is one document. It is what the store persists and what the
//! API hands to subscribers after every mutation:
//!
//! ```text
//! {
//!   "games":   { "<id>": { "id", "title", "columnId", "platforms", "createdAt", ... } },
//!   "columns": { "backlog": { "id", "title", "gameIds": [...] }, "up-next": ..., ... },
//!   "tags":    ["co-op", "short"]
//! }
//! ```
//!
//! Field names are camelCase and timestamps are epoch milliseconds, so a document
//! exported from the browser version of the board loads unchanged.
//!
//! ## Ordering
//!
//! A game's position on the board is its index in its column's `game_ids`. The game
//! record itself carries only `column_id`; the column sequence is the authority for
//! order. Both must agree (see `commands::doctor` for the invariants and their repair).

use crate::error::{BoardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque game identifier. Fresh ids are UUID v4 text, but any string read from a
/// document is accepted.
pub type GameId = String;

/// Current time truncated to the millisecond precision the document stores.
pub fn timestamp_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Backlog,
    UpNext,
    Playing,
    Finished,
}

impl ColumnId {
    /// Board order, left to right.
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Backlog,
        ColumnId::UpNext,
        ColumnId::Playing,
        ColumnId::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Backlog => "backlog",
            ColumnId::UpNext => "up-next",
            ColumnId::Playing => "playing",
            ColumnId::Finished => "finished",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Backlog => "Backlog",
            ColumnId::UpNext => "Up Next",
            ColumnId::Playing => "Playing",
            ColumnId::Finished => "Finished",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "backlog" => Ok(ColumnId::Backlog),
            "up-next" | "upnext" | "next" => Ok(ColumnId::UpNext),
            "playing" => Ok(ColumnId::Playing),
            "finished" | "done" => Ok(ColumnId::Finished),
            _ => Err(BoardError::Api(format!(
                "Unknown column '{}' (expected backlog, up-next, playing or finished)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Switch,
    SteamDeck,
    Steam,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Switch, Platform::SteamDeck, Platform::Steam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Switch => "switch",
            Platform::SteamDeck => "steam-deck",
            Platform::Steam => "steam",
        }
    }

    /// Human readable name, as shown on a card badge.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Switch => "Switch",
            Platform::SteamDeck => "Steam Deck",
            Platform::Steam => "Steam",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "switch" => Ok(Platform::Switch),
            "steam-deck" | "steamdeck" | "deck" => Ok(Platform::SteamDeck),
            "steam" => Ok(Platform::Steam),
            _ => Err(BoardError::Api(format!(
                "Unknown platform '{}' (expected switch, steam-deck or steam)",
                s
            ))),
        }
    }
}

/// Cover art and completion-time estimates fetched from the metadata search service.
///
/// Durations are in seconds. The service reports `0` for "unknown"; those are stored
/// as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub hltb_id: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameplay_main: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameplay_main_extra: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameplay_completionist: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub column_id: ColumnId,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "hltb", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GameMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Game {
    /// A fresh game with a new id, placed (by `column_id`) in the backlog.
    pub fn new(
        title: String,
        platforms: Vec<Platform>,
        metadata: Option<GameMetadata>,
        tags: Vec<String>,
    ) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            column_id: ColumnId::Backlog,
            platforms,
            created_at: now,
            updated_at: now,
            metadata,
            tags,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = timestamp_now();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub game_ids: Vec<GameId>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            game_ids: Vec::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.game_ids.iter().any(|gid| gid == id)
    }
}

fn backlog_column() -> Column {
    Column::new(ColumnId::Backlog)
}

fn up_next_column() -> Column {
    Column::new(ColumnId::UpNext)
}

fn playing_column() -> Column {
    Column::new(ColumnId::Playing)
}

fn finished_column() -> Column {
    Column::new(ColumnId::Finished)
}

/// The four fixed columns. A missing column in a stored document loads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    #[serde(default = "backlog_column")]
    pub backlog: Column,
    #[serde(rename = "up-next", default = "up_next_column")]
    pub up_next: Column,
    #[serde(default = "playing_column")]
    pub playing: Column,
    #[serde(default = "finished_column")]
    pub finished: Column,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            backlog: backlog_column(),
            up_next: up_next_column(),
            playing: playing_column(),
            finished: finished_column(),
        }
    }
}

impl Columns {
    pub fn get(&self, id: ColumnId) -> &Column {
        match id {
            ColumnId::Backlog => &self.backlog,
            ColumnId::UpNext => &self.up_next,
            ColumnId::Playing => &self.playing,
            ColumnId::Finished => &self.finished,
        }
    }

    pub fn get_mut(&mut self, id: ColumnId) -> &mut Column {
        match id {
            ColumnId::Backlog => &mut self.backlog,
            ColumnId::UpNext => &mut self.up_next,
            ColumnId::Playing => &mut self.playing,
            ColumnId::Finished => &mut self.finished,
        }
    }

    /// Columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        ColumnId::ALL.into_iter().map(move |id| self.get(id))
    }
}

/// The aggregate root: every game, the four columns, and the tag registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryState {
    #[serde(default)]
    pub games: HashMap<GameId, Game>,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LibraryState {
    /// The games of a column in board order. Ids that do not resolve are skipped.
    pub fn games_for_column(&self, column: ColumnId) -> Vec<&Game> {
        self.columns
            .get(column)
            .game_ids
            .iter()
            .filter_map(|id| self.games.get(id))
            .collect()
    }

    /// Where a game currently sits, as its column and its index among the column's
    /// resolvable games.
    pub fn position_of(&self, id: &str) -> Option<(ColumnId, usize)> {
        let game = self.games.get(id)?;
        let index = self
            .games_for_column(game.column_id)
            .iter()
            .position(|g| g.id == id)?;
        Some((game.column_id, index))
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }
}
