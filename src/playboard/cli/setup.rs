use clap::{Parser, Subcommand};
use clap_complete::Shell;
use playboard::model::{ColumnId, Platform};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playboard", bin_name = "playboard", version)]
#[command(about = "A kanban-style game backlog board for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $PLAYBOARD_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board
    #[command(alias = "ls", display_order = 1)]
    Board {
        /// Only show games with any of these tags
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Only show one column
        #[arg(short, long)]
        column: Option<ColumnId>,
    },

    /// Add a game to the backlog
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,

        /// Platform (switch, steam-deck, steam); repeatable
        #[arg(short, long = "platform", value_name = "PLATFORM")]
        platforms: Vec<Platform>,

        /// Tag; repeatable
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Look the title up and attach the best match's metadata
        #[arg(short, long)]
        lookup: bool,
    },

    /// Change a game's title, platforms, tags or metadata
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Game id, id prefix or title
        game: String,

        #[arg(long)]
        title: Option<String>,

        /// Replace platforms; repeatable
        #[arg(short, long = "platform", value_name = "PLATFORM")]
        platforms: Vec<Platform>,

        /// Replace tags; repeatable
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Remove all platforms
        #[arg(long, conflicts_with = "platforms")]
        clear_platforms: bool,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Look the (new) title up and replace the metadata with the best match
        #[arg(short, long)]
        lookup: bool,

        /// Remove attached metadata
        #[arg(long, conflicts_with = "lookup")]
        no_metadata: bool,
    },

    /// Show one game in full
    #[command(alias = "v", display_order = 4)]
    Show {
        /// Game id, id prefix or title
        game: String,
    },

    /// Remove a game
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Game id, id prefix or title
        game: String,
    },

    /// Move a game to a column, or reorder it within one
    #[command(alias = "mv", display_order = 6)]
    Move {
        /// Game id, id prefix or title
        game: String,

        /// Target column (backlog, up-next, playing, finished)
        #[arg(required_unless_present = "to")]
        column: Option<ColumnId>,

        /// Drop the game onto this card, taking its slot
        #[arg(long, value_name = "GAME", conflicts_with_all = ["column", "index"])]
        to: Option<String>,

        /// Position in the target column, 0 is the top (default: bottom)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Look games up on the metadata search service
    #[command(alias = "s", display_order = 7)]
    Search {
        /// Query words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Manage tags
    #[command(display_order = 8)]
    Tags {
        #[command(subcommand)]
        action: Option<TagCommands>,
    },

    /// Check and fix board inconsistencies
    #[command(display_order = 20)]
    Doctor,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (e.g., search-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Generate shell completions
    #[command(hide = true, display_order = 22)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags and how many games use them
    #[command(alias = "ls")]
    List,

    /// Create a tag
    Add { name: String },

    /// Delete a tag and remove it from every game
    #[command(alias = "rm")]
    Delete { name: String },
}
