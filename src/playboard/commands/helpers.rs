use crate::error::{BoardError, Result};
use crate::model::{Game, LibraryState, Platform};

/// Shortest id prefix accepted as a selector.
pub const MIN_ID_PREFIX: usize = 4;

/// Trimmed title, or `EmptyTitle` for blank input.
pub fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims tag names, drops blanks and repeats, keeps first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

pub fn dedupe_platforms(platforms: Vec<Platform>) -> Vec<Platform> {
    let mut unique = Vec::with_capacity(platforms.len());
    for platform in platforms {
        if !unique.contains(&platform) {
            unique.push(platform);
        }
    }
    unique
}

/// Adds any tag the registry does not know yet. Returns how many were added.
pub fn register_tags(state: &mut LibraryState, tags: &[String]) -> usize {
    let mut added = 0;
    for tag in tags {
        if !state.has_tag(tag) {
            state.tags.push(tag.clone());
            added += 1;
        }
    }
    added
}

/// Resolves a user-typed selector to a single game.
///
/// Tried in order: exact id, unique id prefix (at least [`MIN_ID_PREFIX`] chars),
/// case-insensitive exact title, unique case-insensitive title fragment.
pub fn resolve_game<'a>(state: &'a LibraryState, selector: &str) -> Result<&'a Game> {
    let selector = selector.trim();
    if let Some(game) = state.games.get(selector) {
        return Ok(game);
    }

    if selector.len() >= MIN_ID_PREFIX {
        let by_prefix: Vec<&Game> = state
            .games
            .values()
            .filter(|g| g.id.starts_with(selector))
            .collect();
        if let Some(game) = single(selector, by_prefix)? {
            return Ok(game);
        }
    }

    let needle = selector.to_lowercase();
    let by_title: Vec<&Game> = state
        .games
        .values()
        .filter(|g| g.title.to_lowercase() == needle)
        .collect();
    if let Some(game) = single(selector, by_title)? {
        return Ok(game);
    }

    let by_fragment: Vec<&Game> = state
        .games
        .values()
        .filter(|g| g.title.to_lowercase().contains(&needle))
        .collect();
    single(selector, by_fragment)?.ok_or_else(|| BoardError::GameNotFound(selector.to_string()))
}

fn single<'a>(selector: &str, mut matches: Vec<&'a Game>) -> Result<Option<&'a Game>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        n => {
            matches.sort_by(|a, b| a.title.cmp(&b.title));
            let titles: Vec<&str> = matches.iter().map(|g| g.title.as_str()).collect();
            Err(BoardError::Api(format!(
                "'{}' matches {} games: {}",
                selector,
                n,
                titles.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;

    fn board_with(titles: &[&str]) -> (LibraryState, Vec<String>) {
        let mut state = LibraryState::default();
        let ids = titles
            .iter()
            .map(|t| {
                add::run(&mut state, t, vec![], None, vec![])
                    .unwrap()
                    .affected_id()
                    .unwrap()
                    .to_string()
            })
            .collect();
        (state, ids)
    }

    #[test]
    fn normalize_title_trims_and_rejects_blank() {
        assert_eq!(normalize_title("  Hades ").unwrap(), "Hades");
        assert!(matches!(normalize_title("   "), Err(BoardError::EmptyTitle)));
    }

    #[test]
    fn normalize_tags_dedupes_in_order() {
        let tags = vec![" co-op".into(), "short".into(), "co-op".into(), "  ".into()];
        assert_eq!(normalize_tags(tags), vec!["co-op", "short"]);
    }

    #[test]
    fn dedupe_platforms_keeps_first_occurrence() {
        let platforms = vec![Platform::Steam, Platform::Switch, Platform::Steam];
        assert_eq!(
            dedupe_platforms(platforms),
            vec![Platform::Steam, Platform::Switch]
        );
    }

    #[test]
    fn resolves_by_id_prefix_and_title() {
        let (state, ids) = board_with(&["Hades", "Celeste"]);
        assert_eq!(resolve_game(&state, &ids[0]).unwrap().title, "Hades");
        assert_eq!(resolve_game(&state, &ids[1][..8]).unwrap().title, "Celeste");
        assert_eq!(resolve_game(&state, "celeste").unwrap().id, ids[1]);
        assert_eq!(resolve_game(&state, "lest").unwrap().id, ids[1]);
    }

    #[test]
    fn exact_title_wins_over_fragment() {
        let (state, ids) = board_with(&["Hades", "Hades II"]);
        assert_eq!(resolve_game(&state, "hades").unwrap().id, ids[0]);
    }

    #[test]
    fn ambiguous_fragment_is_an_error() {
        let (state, _) = board_with(&["Hades II", "Hades III"]);
        match resolve_game(&state, "hades") {
            Err(BoardError::Api(msg)) => assert!(msg.contains("matches 2 games")),
            other => panic!("expected ambiguity error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_selector_is_not_found() {
        let (state, _) = board_with(&["Hades"]);
        assert!(matches!(
            resolve_game(&state, "Zelda"),
            Err(BoardError::GameNotFound(_))
        ));
    }
}
