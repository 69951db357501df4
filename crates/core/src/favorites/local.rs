//! Favorites stored as a single JSON array in a key-value store.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::{FavoritesBackend, KeyValueStore, PersistenceError};
use crate::movie::{schema, MovieSummary};

/// Well-known key holding the serialized collection.
pub const DEFAULT_STORAGE_KEY: &str = "movie-favorites";

/// Backend keeping full movie records under one key.
///
/// The stored format is unversioned. Records that no longer pass the shape
/// check are dropped on read (and disappear on the next write).
pub struct LocalFavoritesBackend {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocalFavoritesBackend {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FavoritesBackend for LocalFavoritesBackend {
    fn load(&self) -> Result<Vec<MovieSummary>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let value: Value =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        let parsed =
            schema::parse_collection(&value).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

        if parsed.dropped > 0 {
            warn!(
                "Dropped {} invalid favorite record(s) from '{}'",
                parsed.dropped, self.key
            );
        }

        Ok(parsed.movies)
    }

    fn save(&self, favorites: &[MovieSummary]) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(favorites)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
        self.store.put(&self.key, &raw)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryKeyValueStore;

    fn movie(id: &str) -> MovieSummary {
        MovieSummary::new(id, "Goodfellas", "1990", "movie", "/goodfellas.png")
    }

    fn backend() -> (Arc<MemoryKeyValueStore>, LocalFavoritesBackend) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let backend = LocalFavoritesBackend::new(store.clone());
        (store, backend)
    }

    #[test]
    fn test_uninitialized_store_reads_empty() {
        let (_, backend) = backend();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (store, backend) = backend();
        backend.save(&[movie("tt1"), movie("tt2")]).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded, vec![movie("tt1"), movie("tt2")]);

        let raw = store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"imdbID\":\"tt1\""));
    }

    #[test]
    fn test_invalid_records_are_filtered() {
        let (store, backend) = backend();
        store
            .put(
                DEFAULT_STORAGE_KEY,
                r#"[{"imdbID":"tt1","Title":"A","Year":"1","Type":"movie","Poster":""},{"imdbID":"tt2","Title":"B"}]"#,
            )
            .unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].imdb_id, "tt1");
    }

    #[test]
    fn test_unparsable_blob_is_corrupt() {
        let (store, backend) = backend();
        store.put(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(backend.load(), Err(PersistenceError::Corrupt(_))));

        store.put(DEFAULT_STORAGE_KEY, r#"{"a":1}"#).unwrap();
        assert!(matches!(backend.load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn test_custom_key() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let backend = LocalFavoritesBackend::with_key(store.clone(), "other");
        backend.save(&[movie("tt1")]).unwrap();

        assert_eq!(backend.key(), "other");
        assert!(store.get("other").unwrap().is_some());
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
