use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use arc_swap::ArcSwapOption;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    catalog::{
        history::{HistoryView, SearchHistory},
        model::{Album, SearchQuery},
    },
    config::Credentials,
    http::{ApiError, CatalogApi},
};

pub const SEARCH_LIMIT: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Failed to authenticate with Spotify")]
    AuthenticationFailed,

    #[error("Not authenticated. Press Ctrl+R to reconnect.")]
    NotAuthenticated,

    #[error("Authentication expired. Press Ctrl+R to reconnect.")]
    AuthenticationExpired,

    #[error("Failed to search albums. Please try again.")]
    SearchFailed,

    #[error("Album not found")]
    AlbumNotFound,

    #[error("Failed to load album details.")]
    LookupFailed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub results: Vec<Album>,
    pub loading: bool,
    pub error: Option<CatalogError>,
    pub authenticated: bool,
    /// A token request is in flight.
    pub authenticating: bool,
}

/// Owns the token and the observable search state. Consumers only get
/// snapshots and subscriptions; every mutation goes through this type.
pub struct CatalogClient {
    api: Arc<dyn CatalogApi>,
    credentials: Credentials,
    history: SearchHistory,
    token: ArcSwapOption<String>,
    state: watch::Sender<CatalogState>,
    latest_search: AtomicU64,
}

impl CatalogClient {
    pub fn new(api: Arc<dyn CatalogApi>, credentials: Credentials, history: SearchHistory) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            api,
            credentials,
            history,
            token: ArcSwapOption::empty(),
            state,
            latest_search: AtomicU64::new(0),
        }
    }

    pub async fn authenticate(&self) -> Result<(), CatalogError> {
        self.state.send_modify(|s| s.authenticating = true);

        match self.api.request_token(&self.credentials).await {
            Ok(auth) => {
                self.token.store(Some(Arc::new(auth.access_token)));
                self.state.send_modify(|s| {
                    s.authenticating = false;
                    s.authenticated = true;
                    s.error = None;
                });
                info!("Authenticated with Spotify");
                Ok(())
            }
            Err(e) => {
                warn!("Authentication failed: {}", e);
                self.state.send_modify(|s| {
                    s.authenticating = false;
                    s.error = Some(CatalogError::AuthenticationFailed);
                });
                Err(CatalogError::AuthenticationFailed)
            }
        }
    }

    /// Searches albums and publishes the outcome to subscribers.
    ///
    /// Only the most recently dispatched search may publish. A response that
    /// arrives after a newer search was dispatched is dropped, together with
    /// its history entry, and an empty list is returned.
    pub async fn search(&self, query: &str) -> Vec<Album> {
        let query = query.trim();
        if query.is_empty() {
            self.state.send_modify(|s| s.results.clear());
            return Vec::new();
        }

        let ticket = self.latest_search.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let Some(token) = self.token.load_full() else {
            self.state.send_modify(|s| {
                s.loading = false;
                s.error = Some(CatalogError::NotAuthenticated);
            });
            return Vec::new();
        };

        let result = self.api.search_albums(&token, query, SEARCH_LIMIT).await;

        match result {
            Ok(page) => {
                let albums = page.items;
                let published = self.publish_if_latest(ticket, |s| {
                    s.results = albums.clone();
                    s.loading = false;
                    s.error = None;
                });
                if !published {
                    debug!("Dropping stale results for '{}'", query);
                    return Vec::new();
                }
                debug!("Search '{}' returned {} of {} albums", query, albums.len(), page.total);
                self.history.record(query);
                albums
            }
            Err(e) => {
                let error = match e.status() {
                    Some(401) => CatalogError::AuthenticationExpired,
                    _ => CatalogError::SearchFailed,
                };
                let published = self.publish_if_latest(ticket, |s| {
                    s.loading = false;
                    s.error = Some(error);
                    s.results.clear();
                });
                if published {
                    warn!("Search '{}' failed: {}", query, e);
                } else {
                    debug!("Dropping stale failure for '{}': {}", query, e);
                }
                Vec::new()
            }
        }
    }

    /// Applies `update` only while `ticket` is still the latest search.
    /// The ticket is compared under the channel's write lock.
    fn publish_if_latest(&self, ticket: u64, update: impl FnOnce(&mut CatalogState)) -> bool {
        self.state.send_if_modified(|s| {
            if self.latest_search.load(Ordering::SeqCst) != ticket {
                return false;
            }
            update(s);
            true
        })
    }

    /// Fetches a single album for the detail view. Leaves the search
    /// results and the loading flag alone.
    pub async fn lookup(&self, id: &str) -> Result<Album, CatalogError> {
        let Some(token) = self.token.load_full() else {
            self.set_error(CatalogError::NotAuthenticated);
            return Err(CatalogError::NotAuthenticated);
        };

        self.api.album(&token, id).await.map_err(|e| {
            warn!("Album lookup '{}' failed: {}", id, e);
            let error = lookup_error(&e);
            self.set_error(error.clone());
            error
        })
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    pub fn recent_queries(&self) -> Vec<SearchQuery> {
        self.history.recent_five()
    }

    pub fn subscribe_history(&self) -> HistoryView {
        self.history.subscribe()
    }

    fn set_error(&self, error: CatalogError) {
        self.state.send_modify(|s| s.error = Some(error));
    }
}

fn lookup_error(e: &ApiError) -> CatalogError {
    match e.status() {
        Some(400) | Some(404) => CatalogError::AlbumNotFound,
        Some(401) => CatalogError::AuthenticationExpired,
        _ => CatalogError::LookupFailed,
    }
}
