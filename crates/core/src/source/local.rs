//! In-process sources.

use std::sync::Arc;

use async_trait::async_trait;

use super::{FavoritesSource, MovieSource, SourceError};
use crate::catalog::MovieCatalog;
use crate::favorites::FavoritesRepository;
use crate::movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};

/// Favorites kept by a repository in this process.
#[derive(Clone)]
pub struct LocalFavorites {
    repository: FavoritesRepository,
}

impl LocalFavorites {
    pub fn new(repository: FavoritesRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &FavoritesRepository {
        &self.repository
    }
}

#[async_trait]
impl FavoritesSource for LocalFavorites {
    async fn list(&self) -> Result<Vec<MovieSummary>, SourceError> {
        Ok(self.repository.get())
    }

    async fn add(&self, movie: &MovieSummary) -> Result<(), SourceError> {
        self.repository.add(movie.clone())?;
        Ok(())
    }

    async fn remove(&self, imdb_id: &str) -> Result<(), SourceError> {
        self.repository.remove(imdb_id)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SourceError> {
        self.repository.clear()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.repository.backend_name()
    }
}

/// Search and detail served straight from a catalog.
#[derive(Clone)]
pub struct CatalogMovies {
    catalog: Arc<dyn MovieCatalog>,
}

impl CatalogMovies {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl MovieSource for CatalogMovies {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SourceError> {
        Ok(self.catalog.search(query)?)
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        Ok(self.catalog.get(imdb_id)?)
    }
}
