use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use marquee_core::{
    Config, FavoritesBackend, FavoritesBackendKind, FavoritesRepository,
    InMemoryFavoritesBackend, LocalFavoritesBackend, MovieCatalog, PersistenceError,
    SanitizedConfig, SqliteKeyValueStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: Arc<dyn MovieCatalog>,
    favorites: FavoritesRepository,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        favorites: FavoritesRepository,
    ) -> Self {
        Self {
            config,
            catalog,
            favorites,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &dyn MovieCatalog {
        self.catalog.as_ref()
    }

    pub fn favorites(&self) -> &FavoritesRepository {
        &self.favorites
    }

    /// Sleep for the configured artificial latency, if any.
    pub async fn simulate_latency(&self) {
        let ms = self.config.server.simulated_latency_ms;
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Create the favorites backend selected in the config.
pub fn create_favorites_backend(
    config: &Config,
    catalog: Arc<dyn MovieCatalog>,
) -> Result<Arc<dyn FavoritesBackend>, PersistenceError> {
    match config.favorites.backend {
        FavoritesBackendKind::Memory => Ok(Arc::new(InMemoryFavoritesBackend::new(catalog))),
        FavoritesBackendKind::Local => {
            let path = config.favorites.path.as_deref().ok_or_else(|| {
                PersistenceError::Unavailable("favorites.path is not set".to_string())
            })?;
            open_local_backend(path, &config.favorites.storage_key)
        }
    }
}

fn open_local_backend(
    path: &Path,
    storage_key: &str,
) -> Result<Arc<dyn FavoritesBackend>, PersistenceError> {
    let store = Arc::new(SqliteKeyValueStore::new(path)?);
    Ok(Arc::new(LocalFavoritesBackend::with_key(store, storage_key)))
}
