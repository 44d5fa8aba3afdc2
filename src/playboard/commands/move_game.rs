use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ColumnId, LibraryState};

/// Moves a game to `target_index` of `target` (a reorder when `target` is its current
/// column). Unknown ids are a no-op.
///
/// The game is taken out of its current sequence first and then inserted, so the
/// index refers to the target sequence without the game in it. An index past the
/// end appends. A move that would leave the game where it is changes nothing, not
/// even `updatedAt`.
pub fn run(
    state: &mut LibraryState,
    id: &str,
    target: ColumnId,
    target_index: usize,
) -> Result<CmdResult> {
    let Some(source) = state.games.get(id).map(|g| g.column_id) else {
        return Ok(CmdResult::default());
    };

    if source == target && stays_in_place(&state.columns.get(source).game_ids, id, target_index)
    {
        let mut result = CmdResult::default();
        if let Some(game) = state.games.get(id) {
            result.add_message(CmdMessage::info(format!("{} is already there.", game.title)));
        }
        return Ok(result);
    }

    let Some(game) = state.games.get_mut(id) else {
        return Ok(CmdResult::default());
    };

    state
        .columns
        .get_mut(source)
        .game_ids
        .retain(|gid| gid != id);

    let target_ids = &mut state.columns.get_mut(target).game_ids;
    // A document with the id listed in another column must still end up with it once.
    target_ids.retain(|gid| gid != id);
    let index = target_index.min(target_ids.len());
    target_ids.insert(index, id.to_string());

    game.column_id = target;
    game.touch();

    let mut result = CmdResult::changed();
    if source == target {
        result.add_message(CmdMessage::success(format!(
            "Reordered {} in {}",
            game.title,
            target.title()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Moved {}: {} -> {}",
            game.title,
            source.title(),
            target.title()
        )));
    }
    Ok(result.with_affected_games(vec![game.clone()]))
}

/// True when `id` is listed once in `ids` and the clamped index is its own slot.
fn stays_in_place(ids: &[String], id: &str, target_index: usize) -> bool {
    let mut listed = ids.iter().enumerate().filter(|(_, gid)| *gid == id);
    match (listed.next(), listed.next()) {
        (Some((current, _)), None) => target_index.min(ids.len() - 1) == current,
        _ => false,
    }
}
