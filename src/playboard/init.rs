use crate::api::BoardApi;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the data directory when `--data` is not given.
pub const DATA_DIR_ENV: &str = "PLAYBOARD_HOME";

pub struct BoardContext {
    pub api: BoardApi<FileStore>,
    pub config: BoardConfig,
    pub data_dir: PathBuf,
}

/// Picks the data directory: an explicit path, then `$PLAYBOARD_HOME`, then the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_data_dir_from(explicit, std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir_from(explicit: Option<&Path>, env_value: Option<String>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    ProjectDirs::from("com", "playboard", "playboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BoardError::Api("Could not determine a data directory".into()))
}

pub fn initialize(data_dir: Option<&Path>) -> Result<BoardContext> {
    let data_dir = resolve_data_dir(data_dir)?;
    debug!(data_dir = %data_dir.display(), "Using data directory");

    let config = match BoardConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable config, using defaults");
            BoardConfig::default()
        }
    };

    let store = FileStore::new(data_dir.clone());
    let api = BoardApi::open(store, data_dir.clone())?;

    Ok(BoardContext {
        api,
        config,
        data_dir,
    })
}
