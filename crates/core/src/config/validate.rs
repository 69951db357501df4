use super::{types::Config, ConfigError, FavoritesBackendKind};
use crate::movie::MAX_PAGE_SIZE;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Default page size is within 1..=MAX_PAGE_SIZE
/// - Storage key is not empty
/// - The local favorites backend has a database path
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let page_size = config.catalog.default_page_size;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "catalog.default_page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if config.favorites.storage_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "favorites.storage_key cannot be empty".to_string(),
        ));
    }

    if config.favorites.backend == FavoritesBackendKind::Local && config.favorites.path.is_none()
    {
        return Err(ConfigError::ValidationError(
            "favorites.path is required when favorites.backend = \"local\"".to_string(),
        ));
    }

    Ok(())
}
