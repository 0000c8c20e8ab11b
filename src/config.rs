use std::{
    env,
    fmt,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, eyre};
use directories::ProjectDirs;
use tracing::{info, warn};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const KEYRING_SERVICE: &str = "albumdeck";
pub const LOG_ENV: &str = "ALBUMDECK_LOG";

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub auth_url: String,
    pub api_url: String,
    pub data_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from the environment. Call after `dotenv`.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), keyring_secret)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        secret_fallback: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let client_id = var("SPOTIFY_CLIENT_ID")
            .ok_or_else(|| eyre!("SPOTIFY_CLIENT_ID environment variable must be set"))?;

        let client_secret = match var("SPOTIFY_CLIENT_SECRET") {
            Some(secret) => secret,
            None => secret_fallback(client_id.as_str()).ok_or_else(|| {
                eyre!(
                    "SPOTIFY_CLIENT_SECRET must be set or stored in the keyring under service '{}'",
                    KEYRING_SERVICE
                )
            })?,
        };

        let data_dir = match var("ALBUMDECK_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            credentials: Credentials {
                client_id,
                client_secret,
            },
            auth_url: var("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            data_dir,
            log_filter: var(LOG_ENV).unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "albumdeck", "albumdeck")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .ok_or_else(|| eyre!("Could not determine a data directory, set ALBUMDECK_DATA_DIR"))
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
fn keyring_secret(client_id: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, client_id)
        .map_err(|e| warn!("Keyring unavailable: {}", e))
        .ok()?;

    match entry.get_password() {
        Ok(secret) => {
            info!("Using client secret from keyring");
            Some(secret)
        }
        Err(e) => {
            warn!("No client secret in keyring: {}", e);
            None
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn keyring_secret(_client_id: &str) -> Option<String> {
    None
}
