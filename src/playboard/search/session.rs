//! Debounced, cancelable searching.
//!
//! Every call to [`SearchSession::search`] supersedes the previous one: its pending
//! timer and any request still in flight are aborted, and a generation counter makes
//! sure a superseded request that slips through never applies its result.
//!
//! State changes are published on a `tokio::sync::watch` channel, so a UI can render
//! whatever the latest [`SearchState`] is without polling the session.

use super::{SearchError, SearchProvider, SearchResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The message shown when a search genuinely fails.
pub const SEARCH_FAILED: &str = "search failed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Must be used from within a tokio runtime.
pub struct SearchSession<P: SearchProvider> {
    provider: Arc<P>,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl<P: SearchProvider> SearchSession<P> {
    pub fn new(provider: P, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            provider: Arc::new(provider),
            debounce,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Issues `query`, replacing whatever was pending. A blank query clears the
    /// results at once and sends nothing.
    pub fn search(&mut self, query: &str) {
        self.cancel_pending();
        let query = query.to_string();
        let blank = query.trim().is_empty();
        let current = Arc::clone(&self.generation);

        // Bumped under the channel lock, the same lock `apply` checks it under.
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = current.fetch_add(1, Ordering::SeqCst) + 1;
            s.query = query.clone();
            s.error = None;
            s.loading = !blank;
            if blank {
                s.results.clear();
            }
        });
        if blank {
            return;
        }

        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            debug!(query = %query, "Sending search");
            let outcome = provider.search(&query).await;
            if let Err(e) = &outcome {
                warn!(query = %query, error = %e, "Search failed");
            }
            if !apply(&state, &current, generation, outcome) {
                debug!(query = %query, "Discarding superseded search result");
            }
        }));
    }

    /// Drops results and any error. Does not cancel a pending search.
    pub fn clear(&mut self) {
        self.state.send_modify(|s| {
            s.results.clear();
            s.error = None;
        });
    }

    /// Waits until no search is loading and returns that state.
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        // the sender lives as long as `self`, so this cannot report a closed channel
        let _ = rx.wait_for(|s| !s.loading).await;
        self.state()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Publishes the outcome of request `generation` unless a newer search was issued.
/// Returns whether it was applied.
fn apply(
    state: &watch::Sender<SearchState>,
    current: &AtomicU64,
    generation: u64,
    outcome: Result<Vec<SearchResult>, SearchError>,
) -> bool {
    state.send_if_modified(|s| {
        if current.load(Ordering::SeqCst) != generation {
            return false;
        }
        s.loading = false;
        match outcome {
            Ok(results) => s.results = results,
            Err(_) => s.error = Some(SEARCH_FAILED.to_string()),
        }
        true
    })
}

impl<P: SearchProvider> Drop for SearchSession<P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
