use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    catalog::{
        CatalogClient, SearchHistory,
        client::SEARCH_LIMIT,
        model::{Album, AlbumPage, AuthResponse},
        storage::MemoryStore,
    },
    config::Credentials,
    http::{ApiError, CatalogApi},
};

/// Scripted stand-in for the Spotify Web API that counts every call.
#[derive(Default)]
pub struct FakeApi {
    pub auth_status: Option<u16>,
    pub searches: Mutex<VecDeque<Result<AlbumPage, u16>>>,
    pub albums: Vec<Album>,
    pub calls: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn with_searches(searches: Vec<Result<AlbumPage, u16>>) -> Self {
        Self {
            searches: Mutex::new(searches.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn request_token(&self, _credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.auth_status {
            Some(status) => Err(ApiError::Status { status }),
            None => Ok(AuthResponse {
                access_token: "token".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
            }),
        }
    }

    async fn search_albums(
        &self,
        token: &str,
        _query: &str,
        limit: u32,
    ) -> Result<AlbumPage, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(token, "token");
        assert_eq!(limit, SEARCH_LIMIT);
        let next = self.searches.lock().unwrap().pop_front();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match next {
            Some(Ok(page)) => Ok(page),
            Some(Err(status)) => Err(ApiError::Status { status }),
            None => Err(ApiError::Decode("no scripted response".to_string())),
        }
    }

    async fn album(&self, _token: &str, id: &str) -> Result<Album, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(ApiError::Status { status: 404 })
    }
}

pub fn page(albums: Vec<Album>) -> AlbumPage {
    AlbumPage {
        total: albums.len() as u32,
        limit: SEARCH_LIMIT,
        offset: 0,
        items: albums,
    }
}

pub fn catalog(api: Arc<FakeApi>) -> CatalogClient {
    CatalogClient::new(
        api,
        Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        },
        SearchHistory::new(Arc::new(MemoryStore::new())),
    )
}
