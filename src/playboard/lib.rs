//! # Playboard Architecture
//!
//! Playboard is a **UI-agnostic game backlog library**: a kanban board with four fixed
//! columns (Backlog, Up Next, Playing, Finished) that games move across as they are
//! planned, played and finished. The command-line board shipped with it is one client
//! of the library, not the library itself.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders the board, handles terminal I/O│
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the current document snapshot                       │
//! │  - Commits mutations, notifies subscribers                  │
//! │  - Drives drag and drop through reorder.rs                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic on a LibraryState                    │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DocumentStore trait, one JSON document          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Metadata lookup ([`search`]) sits beside this stack: it talks to an external
//! HTTP service and produces [`model::GameMetadata`] for the API to attach.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): Thorough unit tests of business logic.
//!    This is where the lion's share of testing lives.
//! 2. **API** (`api.rs`): Commit semantics against `InMemoryStore`: what is saved,
//!    what is published, what survives a failed write.
//! 3. **CLI** (`tests/`): The binary driven end to end against a temporary data
//!    directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Game`, `Column`, `LibraryState`)
//! - [`reorder`]: Drag and drop state machine
//! - [`filter`]: Tag filter for the board view
//! - [`search`]: Metadata search client and debounced session
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`logging`]: `tracing` subscriber bootstrap
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod logging;
pub mod model;
pub mod reorder;
pub mod search;
pub mod store;

#[cfg(test)]
pub mod test_utils;
