use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::LibraryState;

/// Removes a game and strips its id from its column. Unknown ids are a no-op.
pub fn run(state: &mut LibraryState, id: &str) -> Result<CmdResult> {
    let Some(game) = state.games.remove(id) else {
        return Ok(CmdResult::default());
    };

    state
        .columns
        .get_mut(game.column_id)
        .game_ids
        .retain(|gid| gid != id);

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Deleted: {}", game.title)));
    Ok(result.with_affected_games(vec![game]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, move_game};
    use crate::model::ColumnId;

    fn add_game(state: &mut LibraryState, title: &str) -> String {
        add::run(state, title, vec![], None, vec![])
            .unwrap()
            .affected_id()
            .unwrap()
            .to_string()
    }

    #[test]
    fn removes_from_map_and_column() {
        let mut state = LibraryState::default();
        let hades = add_game(&mut state, "Hades");
        let celeste = add_game(&mut state, "Celeste");
        move_game::run(&mut state, &hades, ColumnId::Playing, 0).unwrap();

        let result = run(&mut state, &hades).unwrap();
        assert!(result.changed);
        assert!(!state.games.contains_key(&hades));
        assert!(state.columns.playing.game_ids.is_empty());
        assert_eq!(state.columns.backlog.game_ids, vec![celeste]);
    }

    #[test]
    fn deleting_twice_is_noop() {
        let mut state = LibraryState::default();
        let id = add_game(&mut state, "Hades");
        run(&mut state, &id).unwrap();
        let before = state.clone();

        let second = run(&mut state, &id).unwrap();
        assert!(!second.changed);
        assert!(second.affected_games.is_empty());
        assert_eq!(state, before);
    }
}
