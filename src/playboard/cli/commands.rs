//! # CLI Layer
//!
//! This module is **one possible UI client** for playboard; it is not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print the result
//!
//! ## Games on the Command Line
//!
//! Commands that act on a game take a selector: a full id, an id prefix of at
//! least four characters (as printed on the board), or a title. Moves go through
//! the same drag and drop engine as a pointer would: `mv <game> <column>` drops the
//! card on the column, `mv <game> --to <other>` drops it on another card, taking that
//! card's slot.

use super::render::{
    line_width, print_messages, render_board, render_config, render_game,
    render_search_results, render_tags,
};
use super::setup::{Cli, Commands, TagCommands};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use playboard::api::{BoardApi, ConfigAction};
use playboard::commands::GameUpdate;
use playboard::config::BoardConfig;
use playboard::error::{BoardError, Result};
use playboard::filter::TagFilter;
use playboard::init::initialize;
use playboard::logging::init_logging;
use playboard::model::{ColumnId, GameMetadata, Platform};
use playboard::reorder::{DropOutcome, DropTarget, ReorderEngine};
use playboard::search::{HttpSearchClient, SearchResult, SearchSession};
use playboard::store::fs::FileStore;
use tracing::debug;

struct AppContext {
    api: BoardApi<FileStore>,
    config: BoardConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Completions don't need the board
    if let Some(Commands::Completions { shell }) = &cli.command {
        return handle_completions(*shell);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Board { tags, column }) => handle_board(&mut ctx, tags, column),
        Some(Commands::Add {
            title,
            platforms,
            tags,
            lookup,
        }) => handle_add(&mut ctx, title.join(" "), platforms, tags, lookup),
        Some(Commands::Edit {
            game,
            title,
            platforms,
            tags,
            clear_platforms,
            clear_tags,
            lookup,
            no_metadata,
        }) => {
            let mut update = GameUpdate::new();
            if let Some(title) = title {
                update = update.with_title(title);
            }
            if clear_platforms || !platforms.is_empty() {
                update = update.with_platforms(platforms);
            }
            if clear_tags || !tags.is_empty() {
                update = update.with_tags(tags);
            }
            if no_metadata {
                update = update.with_metadata(None);
            }
            handle_edit(&mut ctx, game, update, lookup)
        }
        Some(Commands::Show { game }) => handle_show(&mut ctx, game),
        Some(Commands::Delete { game }) => handle_delete(&mut ctx, game),
        Some(Commands::Move {
            game,
            column,
            to,
            index,
        }) => handle_move(&mut ctx, game, column, to, index),
        Some(Commands::Search { query }) => handle_search(&mut ctx, query.join(" ")),
        Some(Commands::Tags { action }) => handle_tags(&mut ctx, action),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Completions { shell }) => handle_completions(shell),
        None => handle_board(&mut ctx, Vec::new(), None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data.as_deref())?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn handle_board(ctx: &mut AppContext, tags: Vec<String>, column: Option<ColumnId>) -> Result<()> {
    let filter = TagFilter::with_tags(tags);
    let mut view = ctx.api.board(&filter);
    if let Some(column) = column {
        view.columns.retain(|c| c.id == column);
    }
    print!("{}", render_board(&view, &filter, line_width()));
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    platforms: Vec<Platform>,
    tags: Vec<String>,
    lookup: bool,
) -> Result<()> {
    let metadata = if lookup {
        lookup_metadata(&ctx.config, &title)?
    } else {
        None
    };
    let result = ctx.api.add_game(&title, platforms, metadata, tags)?;
    print_messages(&result.messages);
    if let Some(id) = result.affected_id() {
        println!("{}", id);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: String,
    mut update: GameUpdate,
    lookup: bool,
) -> Result<()> {
    let game = ctx.api.find_game(&selector)?;
    if lookup {
        let title = update.title.clone().unwrap_or_else(|| game.title.clone());
        if let Some(metadata) = lookup_metadata(&ctx.config, &title)? {
            update = update.with_metadata(Some(metadata));
        }
    }
    if update.is_empty() {
        return Err(BoardError::Api("Nothing to change".into()));
    }
    let result = ctx.api.update_game(&game.id, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, selector: String) -> Result<()> {
    let game = ctx.api.find_game(&selector)?;
    print!("{}", render_game(&game));
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selector: String) -> Result<()> {
    let game = ctx.api.find_game(&selector)?;
    let result = ctx.api.delete_game(&game.id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(
    ctx: &mut AppContext,
    selector: String,
    column: Option<ColumnId>,
    to: Option<String>,
    index: Option<usize>,
) -> Result<()> {
    let game = ctx.api.find_game(&selector)?;

    if let (Some(column), Some(index)) = (column, index) {
        let result = ctx.api.move_game(&game.id, column, index)?;
        print_messages(&result.messages);
        return Ok(());
    }

    let target = match (column, to) {
        (_, Some(other)) => DropTarget::Card(ctx.api.find_game(&other)?.id),
        (Some(column), None) => DropTarget::Column(column),
        (None, None) => return Err(BoardError::Api("Give a column or --to <game>".into())),
    };

    let mut engine = ReorderEngine::new();
    let snapshot = ctx.api.snapshot();
    engine.pick_up(&snapshot, &game.id);
    engine.hover(&snapshot, &target);
    match ctx.api.commit_drop(&mut engine, &target)? {
        DropOutcome::Moved(request) => {
            debug!(game = %request.game_id, column = %request.column, index = request.index, "Dropped");
            let state = ctx.api.snapshot();
            let (column, position) = state
                .position_of(&request.game_id)
                .unwrap_or((request.column, request.index));
            println!(
                "Moved {} to {} (#{})",
                game.title,
                column.title(),
                position + 1
            );
        }
        DropOutcome::Unchanged => println!("{} is already there.", game.title),
        DropOutcome::Cancelled => {
            return Err(BoardError::Api(format!("Could not move {}", game.title)))
        }
    }
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: String) -> Result<()> {
    let results = search(&ctx.config, &query)?;
    print!("{}", render_search_results(&results, line_width()));
    Ok(())
}

fn handle_tags(ctx: &mut AppContext, action: Option<TagCommands>) -> Result<()> {
    match action.unwrap_or(TagCommands::List) {
        TagCommands::List => print!("{}", render_tags(&ctx.api.list_tags())),
        TagCommands::Add { name } => print_messages(&ctx.api.add_tag(&name)?.messages),
        TagCommands::Delete { name } => print_messages(&ctx.api.delete_tag(&name)?.messages),
    }
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "playboard", &mut std::io::stdout());
    Ok(())
}

/// Runs one query through a search session and waits for it to settle.
fn search(config: &BoardConfig, query: &str) -> Result<Vec<SearchResult>> {
    let client = HttpSearchClient::from_config(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut session = SearchSession::new(client, config.debounce());
        session.search(query);
        let state = session.settled().await;
        match state.error {
            Some(message) => Err(BoardError::Api(message)),
            None => Ok(state.results),
        }
    })
}

fn lookup_metadata(config: &BoardConfig, title: &str) -> Result<Option<GameMetadata>> {
    let results = search(config, title)?;
    let best = results
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(title.trim()))
        .or_else(|| results.first());
    if let Some(result) = best {
        debug!(hltb_id = %result.id, name = %result.name, "Attaching metadata");
    }
    Ok(best.map(SearchResult::to_metadata))
}
