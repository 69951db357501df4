//! Server-side favorites: identifiers in memory, records from the catalog.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{FavoritesBackend, PersistenceError};
use crate::catalog::MovieCatalog;
use crate::movie::MovieSummary;

/// Backend holding favorite identifiers for the lifetime of the object.
///
/// Created once at service start and injected where needed; dropping it (or
/// restarting the process) loses the collection.
pub struct InMemoryFavoritesBackend {
    ids: RwLock<Vec<String>>,
    catalog: Arc<dyn MovieCatalog>,
}

impl InMemoryFavoritesBackend {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            ids: RwLock::new(Vec::new()),
            catalog,
        }
    }

    /// Stored identifiers, in insertion order.
    pub fn ids(&self) -> Result<Vec<String>, PersistenceError> {
        self.ids
            .read()
            .map(|ids| ids.clone())
            .map_err(|_| PersistenceError::Unavailable("favorites lock poisoned".to_string()))
    }
}

impl FavoritesBackend for InMemoryFavoritesBackend {
    fn load(&self) -> Result<Vec<MovieSummary>, PersistenceError> {
        let ids = self.ids()?;
        let movies: Vec<MovieSummary> = ids
            .iter()
            .filter_map(|id| {
                let movie = self.catalog.summary(id);
                if movie.is_none() {
                    debug!("Favorite {} is not in the catalog, skipping", id);
                }
                movie
            })
            .collect();
        Ok(movies)
    }

    fn save(&self, favorites: &[MovieSummary]) -> Result<(), PersistenceError> {
        let mut ids = self
            .ids
            .write()
            .map_err(|_| PersistenceError::Unavailable("favorites lock poisoned".to_string()))?;
        *ids = favorites.iter().map(|m| m.imdb_id.clone()).collect();
        Ok(())
    }

    /// Only movies the catalog can rehydrate are kept.
    fn accepts(&self, movie: &MovieSummary) -> bool {
        self.catalog.summary(&movie.imdb_id).is_some()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn backend() -> InMemoryFavoritesBackend {
        InMemoryFavoritesBackend::new(Arc::new(StaticCatalog::seeded()))
    }

    #[test]
    fn test_starts_empty() {
        assert!(backend().load().unwrap().is_empty());
    }

    #[test]
    fn test_stores_ids_and_rehydrates_from_catalog() {
        let backend = backend();
        let thin = MovieSummary::new("tt0133093", "", "", "", "");
        backend.save(&[thin]).unwrap();

        assert_eq!(backend.ids().unwrap(), vec!["tt0133093".to_string()]);

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "The Matrix");
        assert_eq!(loaded[0].poster, "/matrix-movie-poster.png");
    }

    #[test]
    fn test_unknown_ids_are_skipped_on_read() {
        let backend = backend();
        backend
            .save(&[
                MovieSummary::new("tt9999999", "Ghost", "2000", "movie", ""),
                MovieSummary::new("tt0099685", "", "", "", ""),
            ])
            .unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].imdb_id, "tt0099685");
    }

    #[test]
    fn test_accepts_only_catalog_movies() {
        let backend = backend();
        assert!(backend.accepts(&MovieSummary::new("tt0133093", "", "", "", "")));
        let ghost = MovieSummary::new("tt7777777", "Ghost", "2000", "movie", "");
        assert!(!backend.accepts(&ghost));
    }

    #[test]
    fn test_instances_are_independent() {
        let a = backend();
        let b = backend();
        a.save(&[MovieSummary::new("tt0099685", "", "", "", "")]).unwrap();

        assert_eq!(a.load().unwrap().len(), 1);
        assert!(b.load().unwrap().is_empty());
    }
}
