use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::favorites::DEFAULT_STORAGE_KEY;
use crate::movie::DEFAULT_PAGE_SIZE;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Artificial delay added to every movie and favorites response.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            simulated_latency_ms: 0,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Where the server keeps favorites.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FavoritesBackendKind {
    /// Identifiers in process memory, lost on restart.
    #[default]
    Memory,
    /// Full records in a SQLite key-value file.
    Local,
}

/// Favorites storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FavoritesConfig {
    #[serde(default)]
    pub backend: FavoritesBackendKind,
    /// Database file (required when backend = "local")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Key the collection is stored under (local backend)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            backend: FavoritesBackendKind::default(),
            path: None,
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Page size used when a search does not ask for one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// API client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API root, e.g. "http://localhost:8080/api"
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How long search and detail results stay fresh; unset means until invalidated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_stale_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            search_stale_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Config as served by the API (filesystem paths reduced to a flag)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub favorites: SanitizedFavoritesConfig,
    pub catalog: CatalogConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFavoritesConfig {
    pub backend: FavoritesBackendKind,
    pub path_configured: bool,
    pub storage_key: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            favorites: SanitizedFavoritesConfig {
                backend: config.favorites.backend,
                path_configured: config.favorites.path.is_some(),
                storage_key: config.favorites.storage_key.clone(),
            },
            catalog: config.catalog.clone(),
            client: config.client.clone(),
        }
    }
}
