//! # Rendering
//!
//! Turns library types into terminal text. Every `render_*` function returns a
//! `String` so output can be tested without a terminal; `commands.rs` prints them.
//!
//! Layout math (widths, truncation, padding) is Unicode-aware: titles are measured in
//! display columns, not bytes or chars.

use chrono::{DateTime, Utc};
use colored::Colorize;
use playboard::api::{BoardView, CmdMessage, MessageLevel, TagUsage};
use playboard::config::BoardConfig;
use playboard::filter::TagFilter;
use playboard::model::{Game, GameMetadata, Platform};
use playboard::search::SearchResult;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Used when stdout is not a terminal.
pub const LINE_WIDTH: usize = 100;
const MIN_LINE_WIDTH: usize = 60;
const MAX_LINE_WIDTH: usize = 140;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Width to lay the board out in.
pub fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(LINE_WIDTH)
        .clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
}

/// Completion time as whole hours, e.g. `12h main`. Unknown times render as nothing.
pub fn format_hours(secs: Option<u64>) -> Option<String> {
    secs.filter(|s| *s > 0)
        .map(|s| format!("{}h main", s / 3600))
}

fn platform_badges(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

pub fn render_board(view: &BoardView, filter: &TagFilter, width: usize) -> String {
    let mut out = String::new();
    if !filter.is_empty() {
        out.push_str(&format!(
            "{} {}\n\n",
            "Filtered by:".dimmed(),
            tag_badges(filter.active()).cyan()
        ));
    }

    for (i, column) in view.columns.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let count = if filter.is_empty() {
            format!("({})", column.total)
        } else {
            format!("({}/{})", column.games.len(), column.total)
        };
        out.push_str(&format!("{} {}\n", column.title.bold(), count.dimmed()));

        if column.games.is_empty() {
            out.push_str(&format!("  {}\n", "-".dimmed()));
            continue;
        }
        for game in &column.games {
            out.push_str(&render_card_line(game, width));
            out.push('\n');
        }
    }
    out
}

/// One card as a single line: id, title, then badges and age on the right.
fn render_card_line(game: &Game, width: usize) -> String {
    let id = short_id(&game.id);

    let mut details: Vec<String> = Vec::new();
    if !game.platforms.is_empty() {
        details.push(platform_badges(&game.platforms));
    }
    if let Some(hours) = format_hours(game.metadata.as_ref().and_then(|m| m.gameplay_main)) {
        details.push(hours);
    }
    if !game.tags.is_empty() {
        details.push(tag_badges(&game.tags));
    }
    let details = details.join("  ");
    let time_ago = format_time_ago(game.updated_at);

    // "  " + id + " " + title + " " + details + time
    let fixed = 2 + id.width() + 1 + 1 + details.width() + TIME_WIDTH;
    let available = width.saturating_sub(fixed).max(ID_WIDTH);
    let title = truncate_to_width(&game.title, available);
    let padding = available.saturating_sub(title.width());

    format!(
        "  {} {}{} {}{}",
        id.dimmed(),
        title,
        " ".repeat(padding),
        details.cyan(),
        time_ago.dimmed()
    )
}

pub fn render_game(game: &Game) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", game.title.bold()));
    out.push_str(&format!("{:<12}{}\n", "Id:", game.id));
    out.push_str(&format!("{:<12}{}\n", "Column:", game.column_id.title()));
    let platforms = if game.platforms.is_empty() {
        "-".to_string()
    } else {
        platform_badges(&game.platforms)
    };
    out.push_str(&format!("{:<12}{}\n", "Platforms:", platforms));
    let tags = if game.tags.is_empty() {
        "-".to_string()
    } else {
        tag_badges(&game.tags)
    };
    out.push_str(&format!("{:<12}{}\n", "Tags:", tags));
    if let Some(metadata) = &game.metadata {
        out.push_str(&render_metadata(metadata));
    }
    out.push_str(&format!(
        "{:<12}{}\n",
        "Added:",
        game.created_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!(
        "{:<12}{}\n",
        "Updated:",
        format_time_ago(game.updated_at).trim()
    ));
    out
}

fn render_metadata(metadata: &GameMetadata) -> String {
    let mut out = String::new();
    let times = [
        ("Main:", metadata.gameplay_main),
        ("Main+Extra:", metadata.gameplay_main_extra),
        ("Complete:", metadata.gameplay_completionist),
    ];
    for (label, secs) in times {
        if let Some(secs) = secs.filter(|s| *s > 0) {
            out.push_str(&format!("{:<12}{}h\n", label, secs / 3600));
        }
    }
    if !metadata.image_url.is_empty() {
        out.push_str(&format!("{:<12}{}\n", "Cover:", metadata.image_url));
    }
    out
}

pub fn render_search_results(results: &[SearchResult], width: usize) -> String {
    if results.is_empty() {
        return "No games found.\n".to_string();
    }
    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        let index = format!("{:>3}. ", i + 1);
        let hours = format_hours(Some(result.gameplay_main)).unwrap_or_default();
        let available = width.saturating_sub(index.width() + hours.width() + 1);
        let name = truncate_to_width(&result.name, available);
        let padding = available.saturating_sub(name.width());
        out.push_str(&format!(
            "{}{}{} {}\n",
            index.yellow(),
            name,
            " ".repeat(padding),
            hours.dimmed()
        ));
    }
    out
}

pub fn render_tags(tags: &[TagUsage]) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }
    let name_width = tags.iter().map(|t| t.name.width()).max().unwrap_or(0);
    tags.iter()
        .map(|t| {
            let padding = name_width.saturating_sub(t.name.width());
            format!(
                "  {}{}  {}\n",
                t.name.cyan(),
                " ".repeat(padding),
                format!("{} game{}", t.games, if t.games == 1 { "" } else { "s" }).dimmed()
            )
        })
        .collect()
}

pub fn render_config(config: &BoardConfig) -> String {
    config
        .list_all()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use playboard::api::ColumnView;
    use playboard::model::ColumnId;

    fn plain() {
        colored::control::set_override(false);
    }

    fn game(title: &str, tags: &[&str], main: Option<u64>) -> Game {
        let metadata = main.map(|secs| GameMetadata {
            hltb_id: "1".into(),
            image_url: String::new(),
            gameplay_main: Some(secs),
            gameplay_main_extra: None,
            gameplay_completionist: None,
        });
        Game::new(
            title.into(),
            vec![Platform::SteamDeck, Platform::Switch],
            metadata,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn view(games: Vec<Game>) -> BoardView {
        let columns = ColumnId::ALL
            .iter()
            .map(|id| {
                let games = if *id == ColumnId::Playing {
                    games.clone()
                } else {
                    vec![]
                };
                ColumnView {
                    id: *id,
                    title: id.title().to_string(),
                    total: games.len(),
                    games,
                }
            })
            .collect();
        BoardView { columns }
    }

    #[test]
    fn hours_are_floored() {
        assert_eq!(format_hours(Some(45_000)).as_deref(), Some("12h main"));
        assert_eq!(format_hours(Some(3_599)).as_deref(), Some("0h main"));
        assert_eq!(format_hours(Some(0)), None);
        assert_eq!(format_hours(None), None);
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("Hades", 10), "Hades");
        assert_eq!(truncate_to_width("Hollow Knight", 7), "Hollow…");
        // wide characters count double
        assert_eq!(truncate_to_width("ゼルダの伝説", 5), "ゼル…");
    }

    #[test]
    fn board_lists_columns_and_card_details() {
        plain();
        let out = render_board(
            &view(vec![game("Hades", &["roguelike"], Some(79_200))]),
            &TagFilter::new(),
            LINE_WIDTH,
        );
        let backlog = out.find("Backlog (0)").unwrap();
        let playing = out.find("Playing (1)").unwrap();
        assert!(backlog < playing);
        assert!(out.contains("Hades"));
        assert!(out.contains("Steam Deck, Switch"));
        assert!(out.contains("22h main"));
        assert!(out.contains("#roguelike"));
    }

    #[test]
    fn board_shows_filter_and_filtered_counts() {
        plain();
        let mut board = view(vec![game("Hades", &["roguelike"], None)]);
        board.columns[2].total = 3;
        let filter = TagFilter::with_tags(["roguelike"]);
        let out = render_board(&board, &filter, LINE_WIDTH);
        assert!(out.starts_with("Filtered by: #roguelike"));
        assert!(out.contains("Playing (1/3)"));
    }

    #[test]
    fn card_line_fits_width() {
        plain();
        let long = game(&"Very Long Title ".repeat(10), &[], None);
        let line = render_card_line(&long, 80);
        assert!(line.width() <= 80, "line too wide: {}", line.width());
        assert!(line.contains('…'));
    }

    #[test]
    fn game_detail_shows_metadata() {
        plain();
        let out = render_game(&game("Hades", &[], Some(79_200)));
        assert!(out.contains("Column:     Backlog"));
        assert!(out.contains("Main:       22h"));
        assert!(!out.contains("Cover:"));
    }

    #[test]
    fn search_results_are_numbered() {
        plain();
        let results = vec![SearchResult {
            id: "1".into(),
            name: "Celeste".into(),
            image_url: String::new(),
            gameplay_main: 28_800,
            gameplay_main_extra: 0,
            gameplay_completionist: 0,
        }];
        let out = render_search_results(&results, LINE_WIDTH);
        assert!(out.starts_with("  1. Celeste"));
        assert!(out.contains("8h main"));
        assert_eq!(render_search_results(&[], LINE_WIDTH), "No games found.\n");
    }

    #[test]
    fn tags_show_usage() {
        plain();
        let out = render_tags(&[
            TagUsage { name: "co-op".into(), games: 1 },
            TagUsage { name: "short".into(), games: 2 },
        ]);
        assert_eq!(out, "  co-op  1 game\n  short  2 games\n");
    }
}
