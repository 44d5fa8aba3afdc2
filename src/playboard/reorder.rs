//! # Drag and Drop Reordering
//!
//! [`ReorderEngine`] is the state machine behind moving cards on the board. It turns
//! a gesture (pick up, hover, release) into at most one [`MoveRequest`], which the
//! caller applies with `move_game` (see [`BoardApi::commit_drop`](crate::api::BoardApi::commit_drop)).
//!
//! ```text
//!   Idle ──pick_up──▶ Dragging ──hover──▶ Previewing ──hover──▶ Previewing
//!    ▲                   │                    │
//!    └──── release / cancel / failure ────────┘
//! ```
//!
//! ## Resolving a target
//!
//! - a column surface resolves to the end of that column
//! - a card resolves to that card's slot in its column, or the end of the column when
//!   the card cannot be found there
//! - the dragged card itself is ignored while hovering
//!
//! The engine only reads the document. Nothing is mutated until a release produces a
//! move, and a release that would leave the game where it already is produces none.

use crate::model::{ColumnId, Game, GameId, LibraryState};

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column(ColumnId),
    Card(GameId),
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        game: GameId,
        source: ColumnId,
    },
    Previewing {
        game: GameId,
        source: ColumnId,
        column: ColumnId,
        index: usize,
    },
}

/// A single `move_game` to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub game_id: GameId,
    pub column: ColumnId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved(MoveRequest),
    /// Released over the game's current position.
    Unchanged,
    /// Released over nothing, or the target could not be resolved.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn dragged(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { game, .. } | DragState::Previewing { game, .. } => Some(game),
        }
    }

    /// Starts dragging `game_id`. Returns false, staying idle, for an unknown game.
    pub fn pick_up(&mut self, library: &LibraryState, game_id: &str) -> bool {
        match library.games.get(game_id) {
            Some(game) => {
                self.state = DragState::Dragging {
                    game: game.id.clone(),
                    source: game.column_id,
                };
                true
            }
            None => {
                self.state = DragState::Idle;
                false
            }
        }
    }

    pub fn hover(&mut self, library: &LibraryState, target: &DropTarget) {
        let (game, source) = match &self.state {
            DragState::Idle => return,
            DragState::Dragging { game, source } | DragState::Previewing { game, source, .. } => {
                (game.clone(), *source)
            }
        };
        if matches!(target, DropTarget::Card(id) if *id == game) {
            return;
        }
        if let Some((column, index)) = resolve(library, target) {
            self.state = DragState::Previewing {
                game,
                source,
                column,
                index,
            };
        }
    }

    /// Ends the gesture. The engine is idle afterwards whatever the outcome.
    pub fn release(&mut self, library: &LibraryState, target: &DropTarget) -> DropOutcome {
        let state = std::mem::take(&mut self.state);
        let (game, slot) = match (state, target) {
            (DragState::Idle, _) | (_, DropTarget::Nothing) => return DropOutcome::Cancelled,
            (DragState::Previewing { game, column, index, .. }, DropTarget::Card(id))
                if *id == game =>
            {
                (game, Some((column, index)))
            }
            (DragState::Dragging { game, .. }, DropTarget::Card(id)) if *id == game => {
                return DropOutcome::Unchanged
            }
            (DragState::Dragging { game, .. } | DragState::Previewing { game, .. }, target) => {
                let slot = resolve(library, target);
                (game, slot)
            }
        };

        let Some((column, index)) = slot else {
            return DropOutcome::Cancelled;
        };
        let Some(current) = library.position_of(&game) else {
            return DropOutcome::Cancelled;
        };

        if effective_slot(library, &game, current.0, column, index) == current {
            return DropOutcome::Unchanged;
        }
        DropOutcome::Moved(MoveRequest {
            game_id: game,
            column,
            index,
        })
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// The games a renderer should show for `column` right now.
    ///
    /// While previewing, the dragged game is taken out of its column and shown at the
    /// candidate slot instead.
    pub fn preview<'a>(&self, library: &'a LibraryState, column: ColumnId) -> Vec<&'a Game> {
        let mut games = library.games_for_column(column);
        let DragState::Previewing {
            game,
            column: target,
            index,
            ..
        } = &self.state
        else {
            return games;
        };
        let Some(dragged) = library.games.get(game) else {
            return games;
        };

        games.retain(|g| g.id != dragged.id);
        if *target == column {
            let index = (*index).min(games.len());
            games.insert(index, dragged);
        }
        games
    }
}

fn resolve(library: &LibraryState, target: &DropTarget) -> Option<(ColumnId, usize)> {
    match target {
        DropTarget::Nothing => None,
        DropTarget::Column(column) => Some((*column, library.games_for_column(*column).len())),
        DropTarget::Card(id) => {
            let card = library.games.get(id)?;
            let games = library.games_for_column(card.column_id);
            let index = games
                .iter()
                .position(|g| g.id == card.id)
                .unwrap_or(games.len());
            Some((card.column_id, index))
        }
    }
}

/// Where a move to `(column, index)` would actually put `game`: the index is clamped to
/// the target column as it looks with the game taken out.
fn effective_slot(
    library: &LibraryState,
    game: &str,
    current_column: ColumnId,
    column: ColumnId,
    index: usize,
) -> (ColumnId, usize) {
    let mut len = library.games_for_column(column).len();
    if column == current_column && library.columns.get(column).contains(game) {
        len = len.saturating_sub(1);
    }
    (column, index.min(len))
}
