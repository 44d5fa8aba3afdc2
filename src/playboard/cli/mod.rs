//! # CLI Behavior
//!
//! This is **one possible UI client** for playboard, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ### Naked Execution (`playboard`)
//!
//! Running `playboard` with no arguments shows the board. Looking at the board is
//! most of the usage, so it is the path of least resistance.
//!
//! ### Metadata Lookup
//!
//! `playboard search <query>` lists matches from the search service. `add --lookup`
//! and `edit --lookup` attach the match whose name equals the title, or the first
//! match otherwise. Lookups never block saving: with `--lookup` and no match the game
//! is still added, just without metadata.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Output formatting (board layout, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
