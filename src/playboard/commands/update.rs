use crate::commands::{CmdMessage, CmdResult, GameUpdate};
use crate::error::Result;
use crate::model::LibraryState;

use super::helpers::{dedupe_platforms, normalize_tags, normalize_title, register_tags};

/// Merges `update` into the game. Unknown ids are a no-op.
///
/// Column membership is never touched here; that is `move_game`'s job.
pub fn run(state: &mut LibraryState, id: &str, update: GameUpdate) -> Result<CmdResult> {
    if !state.games.contains_key(id) {
        return Ok(CmdResult::default());
    }

    // Validate before touching anything so a rejected update leaves no trace.
    let title = update.title.as_deref().map(normalize_title).transpose()?;
    let tags = update.tags.map(normalize_tags);
    if let Some(tags) = &tags {
        register_tags(state, tags);
    }

    let Some(game) = state.games.get_mut(id) else {
        return Ok(CmdResult::default());
    };
    if let Some(title) = title {
        game.title = title;
    }
    if let Some(platforms) = update.platforms {
        game.platforms = dedupe_platforms(platforms);
    }
    if let Some(metadata) = update.metadata {
        game.metadata = metadata;
    }
    if let Some(tags) = tags {
        game.tags = tags;
    }
    game.touch();

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Updated: {}", game.title)));
    Ok(result.with_affected_games(vec![game.clone()]))
}
