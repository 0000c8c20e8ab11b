use async_trait::async_trait;

use crate::{
    catalog::model::{Album, AlbumPage, AuthResponse},
    config::Credentials,
    http::error::ApiError,
};

/// The Spotify Web API calls the catalog client depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn request_token(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;
    async fn search_albums(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<AlbumPage, ApiError>;
    async fn album(&self, token: &str, id: &str) -> Result<Album, ApiError>;
}
