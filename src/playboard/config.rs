use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SEARCH_URL: &str = "http://localhost:5173";
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Keys accepted by `get`/`set`, in display order.
pub const CONFIG_KEYS: [&str; 3] = ["search-url", "debounce-ms", "request-timeout-secs"];

/// Configuration for playboard, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base URL of the metadata search service
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Quiet period before a typed query is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BoardConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BoardError::Io)?;
        let config: BoardConfig =
            serde_json::from_str(&content).map_err(BoardError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BoardError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BoardError::Serialization)?;
        fs::write(config_path, content).map_err(BoardError::Io)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Every key with its current value, in display order.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Value of a config key as text. Underscores are accepted in place of dashes.
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "search-url" => Some(self.search_url.clone()),
            "debounce-ms" => Some(self.debounce_ms.to_string()),
            "request-timeout-secs" => Some(self.request_timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match normalize_key(key).as_str() {
            "search-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(BoardError::Api(format!(
                        "search-url must be an http(s) URL, got '{}'",
                        value
                    )));
                }
                self.search_url = value.trim_end_matches('/').to_string();
            }
            "debounce-ms" => self.debounce_ms = parse_number(key, value)?,
            "request-timeout-secs" => {
                let secs = parse_number(key, value)?;
                if secs == 0 {
                    return Err(BoardError::Api(
                        "request-timeout-secs must be at least 1".to_string(),
                    ));
                }
                self.request_timeout_secs = secs;
            }
            _ => return Err(BoardError::Api(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| {
        BoardError::Api(format!("{} must be a whole number, got '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.search_url, "http://localhost:5173");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = BoardConfig::load(temp.path().join("nowhere")).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");

        let mut config = BoardConfig::default();
        config.set("debounce_ms", "150").unwrap();
        config.save(&dir).unwrap();

        let loaded = BoardConfig::load(&dir).unwrap();
        assert_eq!(loaded.debounce_ms, 150);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{ "search_url": "https://hltb.example" }"#,
        )
        .unwrap();

        let config = BoardConfig::load(temp.path()).unwrap();
        assert_eq!(config.search_url, "https://hltb.example");
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = BoardConfig::default();
        assert!(config.set("search-url", "ftp://nope").is_err());
        assert!(config.set("debounce-ms", "soon").is_err());
        assert!(config.set("request-timeout-secs", "0").is_err());
        assert!(matches!(
            config.set("colour", "red"),
            Err(BoardError::Api(msg)) if msg == "Unknown config key: colour"
        ));

        config.set("search-url", "https://hltb.example/").unwrap();
        assert_eq!(config.get("search_url").unwrap(), "https://hltb.example");
    }
}
