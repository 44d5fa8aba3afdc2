use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ColumnId, Game, GameMetadata, LibraryState, Platform};

use super::helpers::{dedupe_platforms, normalize_tags, normalize_title, register_tags};

/// Adds a new game at the tail of the backlog.
///
/// Tags the registry does not know yet are registered along with the game.
pub fn run(
    state: &mut LibraryState,
    title: &str,
    platforms: Vec<Platform>,
    metadata: Option<GameMetadata>,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let title = normalize_title(title)?;
    let tags = normalize_tags(tags);
    register_tags(state, &tags);

    let game = Game::new(title, dedupe_platforms(platforms), metadata, tags);
    state
        .columns
        .get_mut(ColumnId::Backlog)
        .game_ids
        .push(game.id.clone());
    state.games.insert(game.id.clone(), game.clone());

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Added to backlog: {}", game.title)));
    Ok(result.with_affected_games(vec![game]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::collections::HashSet;

    #[test]
    fn appends_to_backlog_and_returns_fresh_id() {
        let mut state = LibraryState::default();
        let first = run(&mut state, "Hades", vec![Platform::Steam], None, vec![]).unwrap();
        let second = run(&mut state, "Celeste", vec![Platform::Switch], None, vec![]).unwrap();

        let g1 = first.affected_id().unwrap().to_string();
        let g2 = second.affected_id().unwrap().to_string();
        assert_ne!(g1, g2);
        assert_eq!(state.columns.backlog.game_ids, vec![g1.clone(), g2]);
        assert_eq!(state.games[&g1].column_id, ColumnId::Backlog);
        assert_eq!(state.games[&g1].created_at, state.games[&g1].updated_at);
        assert!(first.changed);
    }

    #[test]
    fn ids_stay_unique_across_many_adds() {
        let mut state = LibraryState::default();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let result = run(&mut state, &format!("Game {}", i), vec![], None, vec![]).unwrap();
            assert!(ids.insert(result.affected_id().unwrap().to_string()));
        }
        assert_eq!(state.columns.backlog.game_ids.len(), 50);
        assert_eq!(state.games.len(), 50);
    }

    #[test]
    fn blank_title_is_rejected_without_change() {
        let mut state = LibraryState::default();
        let result = run(&mut state, "   ", vec![], None, vec![]);
        assert!(matches!(result, Err(BoardError::EmptyTitle)));
        assert!(state.games.is_empty());
        assert!(state.columns.backlog.game_ids.is_empty());
    }

    #[test]
    fn title_is_trimmed_and_lists_normalized() {
        let mut state = LibraryState::default();
        let result = run(
            &mut state,
            "  Tunic  ",
            vec![Platform::Switch, Platform::Switch],
            None,
            vec!["zelda-like".into(), " zelda-like ".into()],
        )
        .unwrap();

        let game = &result.affected_games[0];
        assert_eq!(game.title, "Tunic");
        assert_eq!(game.platforms, vec![Platform::Switch]);
        assert_eq!(game.tags, vec!["zelda-like"]);
    }

    #[test]
    fn unknown_tags_are_registered() {
        let mut state = LibraryState::default();
        state.tags.push("co-op".into());
        run(
            &mut state,
            "It Takes Two",
            vec![],
            None,
            vec!["co-op".into(), "couch".into()],
        )
        .unwrap();
        assert_eq!(state.tags, vec!["co-op", "couch"]);
    }

    #[test]
    fn keeps_metadata() {
        let mut state = LibraryState::default();
        let metadata = GameMetadata {
            hltb_id: "10270".into(),
            image_url: "https://howlongtobeat.com/games/hades.jpg".into(),
            gameplay_main: Some(79_200),
            gameplay_main_extra: None,
            gameplay_completionist: Some(342_000),
        };
        let result = run(&mut state, "Hades", vec![], Some(metadata.clone()), vec![]).unwrap();
        let id = result.affected_id().unwrap();
        assert_eq!(state.games[id].metadata, Some(metadata));
    }
}
