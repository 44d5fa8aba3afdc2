use super::{encode_document, DocumentStore};
use crate::error::{BoardError, Result};
use crate::model::LibraryState;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DOCUMENT_FILENAME: &str = "board.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self) -> PathBuf {
        self.root.join(DOCUMENT_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(BoardError::Io)?;
        }
        Ok(())
    }

    /// Moves an unreadable document out of the way so the next save does not
    /// destroy it.
    fn quarantine(&self, path: &Path) -> Result<PathBuf> {
        let target = self.root.join(format!(
            "{}.corrupt-{}",
            DOCUMENT_FILENAME,
            Utc::now().timestamp_millis()
        ));
        fs::rename(path, &target).map_err(BoardError::Io)?;
        Ok(target)
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<LibraryState> {
        let path = self.document_path();
        if !path.exists() {
            debug!(path = %path.display(), "no board document yet, starting empty");
            return Ok(LibraryState::default());
        }

        let content = fs::read(&path).map_err(BoardError::Io)?;
        match serde_json::from_slice::<LibraryState>(&content) {
            Ok(state) => Ok(state),
            Err(err) => {
                let moved_to = self.quarantine(&path)?;
                warn!(
                    error = %err,
                    moved_to = %moved_to.display(),
                    "board document does not match the expected shape, starting from an empty board"
                );
                Ok(LibraryState::default())
            }
        }
    }

    fn save(&mut self, state: &LibraryState) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = encode_document(state)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".board-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(BoardError::Io)?;
        fs::rename(&tmp_path, self.document_path()).map_err(BoardError::Io)?;

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.document_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnId, Game, Platform};
    use crate::test_utils::TestEnv;

    #[test]
    fn load_without_document_is_default() {
        let env = TestEnv::new();
        let state = env.store.load().unwrap();
        assert_eq!(state, LibraryState::default());
    }

    #[test]
    fn save_then_load_reproduces_state() {
        let mut env = TestEnv::new();
        let mut state = LibraryState::default();
        let game = Game::new(
            "Hades".into(),
            vec![Platform::Steam],
            None,
            vec!["roguelike".into()],
        );
        state.columns.get_mut(ColumnId::Backlog).game_ids.push(game.id.clone());
        state.games.insert(game.id.clone(), game);
        state.tags.push("roguelike".into());

        env.store.save(&state).unwrap();
        let loaded = env.store.load().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn save_creates_missing_directory() {
        let env = TestEnv::new();
        let mut store = FileStore::new(env.root.join("nested").join("dir"));
        store.save(&LibraryState::default()).unwrap();
        assert!(store.location().exists());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let mut env = TestEnv::new();
        env.store.save(&LibraryState::default()).unwrap();
        let leftovers: Vec<_> = fs::read_dir(&env.root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn corrupt_document_is_moved_aside() {
        let env = TestEnv::new();
        fs::write(env.root.join(DOCUMENT_FILENAME), "{ \"games\": [1, 2").unwrap();

        let state = env.store.load().unwrap();
        assert_eq!(state, LibraryState::default());
        assert!(!env.root.join(DOCUMENT_FILENAME).exists());

        let quarantined = fs::read_dir(&env.root)
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().contains(".corrupt-"));
        assert!(quarantined);
    }

    #[test]
    fn undecodable_bytes_are_moved_aside() {
        let env = TestEnv::new();
        fs::write(env.root.join(DOCUMENT_FILENAME), [0xff, 0xfe, b'{', b'}']).unwrap();

        let state = env.store.load().unwrap();
        assert_eq!(state, LibraryState::default());
        assert!(!env.root.join(DOCUMENT_FILENAME).exists());
    }

    #[test]
    fn wrong_shape_is_treated_as_corrupt() {
        let env = TestEnv::new();
        fs::write(
            env.root.join(DOCUMENT_FILENAME),
            r#"{ "games": { "g1": { "title": 42 } } }"#,
        )
        .unwrap();

        let state = env.store.load().unwrap();
        assert!(state.games.is_empty());
    }
}
