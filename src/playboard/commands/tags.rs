//! Tag management commands.
//!
//! This module provides operations on the tag registry:
//! - `list_tags`: List all tags with their usage counts
//! - `add_tag`: Register a tag (idempotent)
//! - `delete_tag`: Remove a tag from the registry and from every game carrying it

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BoardError, Result};
use crate::model::LibraryState;

/// A registered tag and how many games carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub name: String,
    pub games: usize,
}

pub fn list_tags(state: &LibraryState) -> Vec<TagUsage> {
    state
        .tags
        .iter()
        .map(|name| TagUsage {
            name: name.clone(),
            games: state.games.values().filter(|g| g.has_tag(name)).count(),
        })
        .collect()
}

/// Registers a tag. Adding an existing tag changes nothing.
pub fn add_tag(state: &mut LibraryState, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BoardError::InvalidTag("tag name cannot be empty".to_string()));
    }

    if state.has_tag(name) {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("Tag '{}' already exists", name)));
        return Ok(result);
    }

    state.tags.push(name.to_string());
    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Created tag '{}'", name)));
    Ok(result)
}

/// Deletes a tag from the registry. Unknown tags are a no-op.
///
/// This cascades to all games that have the tag.
pub fn delete_tag(state: &mut LibraryState, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    let original_len = state.tags.len();
    state.tags.retain(|t| t != name);
    if state.tags.len() == original_len {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("Tag '{}' not found", name)));
        return Ok(result);
    }

    let mut affected = Vec::new();
    for game in state.games.values_mut() {
        if game.has_tag(name) {
            game.tags.retain(|t| t != name);
            game.touch();
            affected.push(game.clone());
        }
    }

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Deleted tag '{}'", name)));
    if !affected.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Removed from {} game{}",
            affected.len(),
            if affected.len() == 1 { "" } else { "s" }
        )));
    }
    Ok(result.with_affected_games(affected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;

    #[test]
    fn add_is_idempotent() {
        let mut state = LibraryState::default();
        assert!(add_tag(&mut state, "co-op").unwrap().changed);
        let again = add_tag(&mut state, " co-op ").unwrap();
        assert!(!again.changed);
        assert_eq!(state.tags, vec!["co-op"]);
    }

    #[test]
    fn blank_tag_is_invalid() {
        let mut state = LibraryState::default();
        assert!(matches!(
            add_tag(&mut state, "  "),
            Err(BoardError::InvalidTag(_))
        ));
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut state = LibraryState::default();
        add_tag(&mut state, "short").unwrap();
        let before = state.clone();
        let result = delete_tag(&mut state, "long").unwrap();
        assert!(!result.changed);
        assert_eq!(state, before);
    }

    #[test]
    fn delete_cascades_to_games() {
        let mut state = LibraryState::default();
        let id = add::run(
            &mut state,
            "Portal 2",
            vec![],
            None,
            vec!["co-op".into(), "puzzle".into()],
        )
        .unwrap()
        .affected_id()
        .unwrap()
        .to_string();

        let result = delete_tag(&mut state, "co-op").unwrap();
        assert!(result.changed);
        assert_eq!(result.affected_games.len(), 1);
        assert_eq!(state.tags, vec!["puzzle"]);
        assert_eq!(state.games[&id].tags, vec!["puzzle"]);
    }

    #[test]
    fn list_counts_usage() {
        let mut state = LibraryState::default();
        add_tag(&mut state, "unused").unwrap();
        add::run(&mut state, "A", vec![], None, vec!["short".into()]).unwrap();
        add::run(&mut state, "B", vec![], None, vec!["short".into()]).unwrap();

        let usage = list_tags(&state);
        assert_eq!(
            usage,
            vec![
                TagUsage { name: "unused".into(), games: 0 },
                TagUsage { name: "short".into(), games: 2 },
            ]
        );
    }
}
