pub mod error;
pub mod traits;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    catalog::model::{Album, AlbumPage, AuthResponse, SearchResponse},
    config::{Config, Credentials},
};

pub use error::ApiError;
pub use traits::CatalogApi;

pub struct SpotifyApi {
    client: Client,
    auth_url: String,
    api_url: Url,
}

impl SpotifyApi {
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            auth_url: config.auth_url.clone(),
            api_url: Url::parse(&config.api_url)?,
        })
    }

    /// `api_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for SpotifyApi {
    async fn request_token(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.client.post(&self.auth_url).form(&form).send().await?;
        let auth: AuthResponse = Self::decode(response).await?;
        debug!(
            "Obtained {} token valid for {}s",
            auth.token_type, auth.expires_in
        );
        Ok(auth)
    }

    async fn search_albums(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<AlbumPage, ApiError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.endpoint(&["search"]))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "album"), ("limit", limit.as_str())])
            .send()
            .await?;

        let search: SearchResponse = Self::decode(response).await?;
        Ok(search.albums)
    }

    async fn album(&self, token: &str, id: &str) -> Result<Album, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["albums", id]))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }
}
