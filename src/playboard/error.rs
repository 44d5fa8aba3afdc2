use crate::search::SearchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
