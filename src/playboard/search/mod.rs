//! # Metadata Search
//!
//! Games can carry cover art and completion-time estimates looked up from an external
//! search service. This module is the client side of that lookup:
//!
//! - [`SearchProvider`]: the seam. Anything that turns a query into results.
//! - [`HttpSearchClient`]: the production provider, `GET {base}/api/hltb/search?q=..`
//! - [`SearchSession`]: debounced, cancelable searching for interactive input. Only
//!   the most recently issued query ever applies its result.
//!
//! The service itself (scraping, rate limiting, auth) is someone else's problem; it
//! is treated as an opaque HTTP endpoint returning a JSON array of [`SearchResult`].

use crate::model::GameMetadata;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

pub mod client;
pub mod session;

pub use client::HttpSearchClient;
pub use session::{SearchSession, SearchState, SEARCH_FAILED};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search service returned HTTP {0}")]
    Status(u16),

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One hit from the search service. Durations are seconds, `0` meaning unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub gameplay_main: u64,
    #[serde(default)]
    pub gameplay_main_extra: u64,
    #[serde(default)]
    pub gameplay_completionist: u64,
}

impl SearchResult {
    /// The metadata record to attach to a game picked from this result.
    pub fn to_metadata(&self) -> GameMetadata {
        GameMetadata {
            hltb_id: self.id.clone(),
            image_url: self.image_url.clone(),
            gameplay_main: known(self.gameplay_main),
            gameplay_main_extra: known(self.gameplay_main_extra),
            gameplay_completionist: known(self.gameplay_completionist),
        }
    }
}

fn known(secs: u64) -> Option<u64> {
    (secs > 0).then_some(secs)
}

/// Looks games up by name.
pub trait SearchProvider: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let json = r#"[{
            "id": "10270",
            "name": "Hollow Knight",
            "imageUrl": "https://howlongtobeat.com/games/hollow.jpg",
            "gameplayMain": 97200,
            "gameplayMainExtra": 151200,
            "gameplayCompletionist": 0
        }]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].name, "Hollow Knight");
        assert_eq!(results[0].gameplay_main, 97200);
    }

    #[test]
    fn zero_durations_become_unknown() {
        let result = SearchResult {
            id: "10270".into(),
            name: "Hollow Knight".into(),
            image_url: "https://img".into(),
            gameplay_main: 97200,
            gameplay_main_extra: 0,
            gameplay_completionist: 0,
        };
        let metadata = result.to_metadata();
        assert_eq!(metadata.hltb_id, "10270");
        assert_eq!(metadata.gameplay_main, Some(97200));
        assert_eq!(metadata.gameplay_main_extra, None);
        assert_eq!(metadata.gameplay_completionist, None);
    }
}
