//! Document verification and repair.
//!
//! The document invariants:
//! - every id listed in a column has a game record
//! - every game is listed exactly once, in exactly one column
//! - a game's `column_id` names the column that lists it
//!
//! Repair keeps the first listing of a game (columns in board order, front to back),
//! drops ids without a record, and appends unlisted games to the tail of the column
//! their `column_id` names. Repair never touches `updated_at`.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ColumnId, GameId, LibraryState};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Listed ids with no game record.
    pub dangling_ids: Vec<GameId>,
    /// Extra listings of a game already listed earlier.
    pub duplicate_listings: usize,
    /// Games whose `column_id` was corrected to the column listing them.
    pub relocated: Vec<GameId>,
    /// Games listed nowhere, appended to their column.
    pub reattached: Vec<GameId>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_ids.is_empty()
            && self.duplicate_listings == 0
            && self.relocated.is_empty()
            && self.reattached.is_empty()
    }
}

/// Repairs `state` in place and reports what was wrong.
pub fn repair(state: &mut LibraryState) -> RepairReport {
    let mut report = RepairReport::default();
    let mut seen: HashSet<GameId> = HashSet::new();

    for column_id in ColumnId::ALL {
        let listed = std::mem::take(&mut state.columns.get_mut(column_id).game_ids);
        let mut kept = Vec::with_capacity(listed.len());
        for id in listed {
            let Some(game) = state.games.get_mut(&id) else {
                report.dangling_ids.push(id);
                continue;
            };
            if !seen.insert(id.clone()) {
                report.duplicate_listings += 1;
                continue;
            }
            if game.column_id != column_id {
                game.column_id = column_id;
                report.relocated.push(id.clone());
            }
            kept.push(id);
        }
        state.columns.get_mut(column_id).game_ids = kept;
    }

    let mut unlisted: Vec<_> = state
        .games
        .values()
        .filter(|g| !seen.contains(&g.id))
        .map(|g| (g.created_at, g.id.clone(), g.column_id))
        .collect();
    unlisted.sort();
    for (_, id, column_id) in unlisted {
        state.columns.get_mut(column_id).game_ids.push(id.clone());
        report.reattached.push(id);
    }

    report
}

pub fn run(state: &mut LibraryState) -> Result<CmdResult> {
    let report = repair(state);
    let mut result = if report.is_clean() {
        CmdResult::default()
    } else {
        CmdResult::changed()
    };

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        if !report.dangling_ids.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} listed id(s) with no game.",
                report.dangling_ids.len()
            )));
        }
        if report.duplicate_listings > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} duplicate listing(s).",
                report.duplicate_listings
            )));
        }
        if !report.relocated.is_empty() {
            result.add_message(CmdMessage::info(format!(
                "  - Corrected the column of {} game(s).",
                report.relocated.len()
            )));
        }
        if !report.reattached.is_empty() {
            result.add_message(CmdMessage::success(format!(
                "  - Re-attached {} game(s) missing from every column.",
                report.reattached.len()
            )));
        }
    }

    Ok(result.with_repair(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, move_game};

    fn add_game(state: &mut LibraryState, title: &str) -> String {
        add::run(state, title, vec![], None, vec![])
            .unwrap()
            .affected_id()
            .unwrap()
            .to_string()
    }

    #[test]
    fn clean_document_is_untouched() {
        let mut state = LibraryState::default();
        let a = add_game(&mut state, "A");
        add_game(&mut state, "B");
        move_game::run(&mut state, &a, ColumnId::Playing, 0).unwrap();
        let before = state.clone();

        let result = run(&mut state).unwrap();
        assert!(!result.changed);
        assert!(result.repair.unwrap().is_clean());
        assert_eq!(state, before);
    }

    #[test]
    fn removes_dangling_and_duplicate_ids() {
        let mut state = LibraryState::default();
        let a = add_game(&mut state, "A");
        state.columns.backlog.game_ids.push("ghost".into());
        state.columns.backlog.game_ids.push(a.clone());

        let report = repair(&mut state);
        assert_eq!(report.dangling_ids, vec!["ghost".to_string()]);
        assert_eq!(report.duplicate_listings, 1);
        assert_eq!(state.columns.backlog.game_ids, vec![a]);
    }

    #[test]
    fn first_listing_wins() {
        let mut state = LibraryState::default();
        let a = add_game(&mut state, "A");
        // backlog precedes finished in board order
        state.columns.finished.game_ids.push(a.clone());
        let report = repair(&mut state);
        assert_eq!(report.duplicate_listings, 1);
        assert_eq!(state.games[&a].column_id, ColumnId::Backlog);
        assert!(state.columns.finished.game_ids.is_empty());
    }

    #[test]
    fn corrects_column_id_to_listing_column() {
        let mut state = LibraryState::default();
        let a = add_game(&mut state, "A");
        state.games.get_mut(&a).unwrap().column_id = ColumnId::Finished;
        let updated_at = state.games[&a].updated_at;

        let report = repair(&mut state);
        assert_eq!(report.relocated, vec![a.clone()]);
        assert_eq!(state.games[&a].column_id, ColumnId::Backlog);
        assert_eq!(state.games[&a].updated_at, updated_at);
    }

    #[test]
    fn reattaches_unlisted_games_to_their_column() {
        let mut state = LibraryState::default();
        let a = add_game(&mut state, "A");
        let b = add_game(&mut state, "B");
        move_game::run(&mut state, &b, ColumnId::Playing, 0).unwrap();
        state.columns.playing.game_ids.clear();

        let result = run(&mut state).unwrap();
        assert!(result.changed);
        assert_eq!(result.repair.unwrap().reattached, vec![b.clone()]);
        assert_eq!(state.columns.playing.game_ids, vec![b]);
        assert_eq!(state.columns.backlog.game_ids, vec![a]);
    }
}
