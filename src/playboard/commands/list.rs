use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::TagFilter;
use crate::model::{ColumnId, Game, LibraryState};
use serde::Serialize;

/// One column of the board, materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub games: Vec<Game>,
    /// Games in the column before filtering.
    pub total: usize,
}

/// The four columns in board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn game_count(&self) -> usize {
        self.columns.iter().map(|c| c.games.len()).sum()
    }
}

/// The games of `column` in order. Ids without a game record are skipped.
pub fn games_for_column(state: &LibraryState, column: ColumnId) -> Vec<Game> {
    state
        .games_for_column(column)
        .into_iter()
        .cloned()
        .collect()
}

pub fn board(state: &LibraryState, filter: &TagFilter) -> BoardView {
    let columns = state
        .columns
        .iter()
        .map(|column| {
            let games = state.games_for_column(column.id);
            let total = games.len();
            ColumnView {
                id: column.id,
                title: column.title.clone(),
                games: games
                    .into_iter()
                    .filter(|g| filter.matches(g))
                    .cloned()
                    .collect(),
                total,
            }
        })
        .collect();
    BoardView { columns }
}

/// Lists one column, or every column in board order.
pub fn run(state: &LibraryState, column: Option<ColumnId>, filter: &TagFilter) -> Result<CmdResult> {
    let columns: Vec<ColumnId> = match column {
        Some(id) => vec![id],
        None => ColumnId::ALL.to_vec(),
    };
    let listed = columns
        .into_iter()
        .flat_map(|id| games_for_column(state, id))
        .filter(|g| filter.matches(g))
        .collect();
    Ok(CmdResult::default().with_listed_games(listed))
}
