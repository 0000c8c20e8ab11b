use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub total_tracks: u32,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub uri: String,
}

impl Album {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }

    /// Spotify orders images widest first.
    pub fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }

    pub fn spotify_url(&self) -> Option<&str> {
        self.external_urls
            .spotify
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// Release dates come with `year`, `month` or `day` precision.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.split('-').next()?.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub items: Vec<Album>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub albums: AlbumPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A recorded search, persisted as `{query, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn matches(&self, other: &str) -> bool {
        self.query.to_lowercase() == other.trim().to_lowercase()
    }
}

#[cfg(test)]
impl Album {
    pub fn mock(id: &str, name: &str, artist: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            artists: vec![Artist {
                id: format!("{id}-artist"),
                name: artist.to_string(),
                external_urls: ExternalUrls::default(),
            }],
            images: Vec::new(),
            release_date: "1997-05-21".to_string(),
            total_tracks: 12,
            album_type: "album".to_string(),
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/album/{id}")),
            },
            uri: format!("spotify:album:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "albums": {
            "href": "https://api.spotify.com/v1/search?query=ok&type=album",
            "items": [{
                "album_type": "album",
                "artists": [{
                    "external_urls": {"spotify": "https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb"},
                    "id": "4Z8W4fKeB5YxbusRsdQVPb",
                    "name": "Radiohead",
                    "type": "artist"
                }],
                "external_urls": {"spotify": "https://open.spotify.com/album/6dVIqQ8qmQ5GBnJ9shOYGE"},
                "id": "6dVIqQ8qmQ5GBnJ9shOYGE",
                "images": [
                    {"height": 640, "url": "https://i.scdn.co/image/large", "width": 640},
                    {"height": null, "url": "https://i.scdn.co/image/unknown", "width": null}
                ],
                "name": "OK Computer",
                "release_date": "1997-05-21",
                "release_date_precision": "day",
                "total_tracks": 12,
                "uri": "spotify:album:6dVIqQ8qmQ5GBnJ9shOYGE"
            }],
            "limit": 20,
            "offset": 0,
            "total": 1
        }
    }"#;

    #[test]
    fn test_search_response_parses_spotify_payload() {
        let response: SearchResponse = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(response.albums.total, 1);
        assert_eq!(response.albums.limit, 20);

        let album = &response.albums.items[0];
        assert_eq!(album.name, "OK Computer");
        assert_eq!(album.artist_names(), "Radiohead");
        assert_eq!(album.cover_url(), Some("https://i.scdn.co/image/large"));
        assert_eq!(album.images[1].height, None);
        assert_eq!(
            album.spotify_url(),
            Some("https://open.spotify.com/album/6dVIqQ8qmQ5GBnJ9shOYGE")
        );
        assert_eq!(album.release_year(), Some(1997));
    }

    #[test]
    fn test_release_year_handles_year_precision() {
        let mut album = Album::mock("a", "Kid A", "Radiohead");
        album.release_date = "2000".to_string();
        assert_eq!(album.release_year(), Some(2000));

        album.release_date = String::new();
        assert_eq!(album.release_year(), None);
    }

    #[test]
    fn test_search_query_matches_ignores_case_and_padding() {
        let query = SearchQuery::new("  Daft Punk ");
        assert_eq!(query.query, "Daft Punk");
        assert!(query.matches("daft punk"));
        assert!(query.matches(" DAFT PUNK"));
        assert!(!query.matches("daft"));
    }
}
