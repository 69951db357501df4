//! Mock search and detail provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{MovieCatalog, StaticCatalog};
use crate::movie::{MovieDetail, SearchPage, SearchQuery};
use crate::source::{MovieSource, SourceError};

/// Mock implementation of [`MovieSource`] answering from the seeded catalog.
///
/// Counts calls so tests can tell cache hits from fetches.
#[derive(Clone)]
pub struct MockMovieSource {
    catalog: Arc<StaticCatalog>,
    searches: Arc<RwLock<Vec<SearchQuery>>>,
    details: Arc<RwLock<Vec<String>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
}

impl Default for MockMovieSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieSource {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(StaticCatalog::seeded()),
            searches: Arc::new(RwLock::new(Vec::new())),
            details: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    pub async fn detail_count(&self) -> usize {
        self.details.read().await.len()
    }

    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<SourceError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MovieSource for MockMovieSource {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SourceError> {
        self.searches.write().await.push(query.clone());
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(self.catalog.search(query)?)
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        self.details.write().await.push(imdb_id.to_string());
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(self.catalog.get(imdb_id)?)
    }
}
