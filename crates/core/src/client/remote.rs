//! Favorites kept by the API server.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::ApiClient;
use crate::movie::{schema, MovieSummary};
use crate::source::{FavoritesSource, SourceError};

/// [`FavoritesSource`] backed by the `/favorites` endpoints.
///
/// Records are validated before they are sent; an invalid record is logged
/// and dropped without a request.
#[derive(Debug, Clone)]
pub struct RemoteFavorites {
    api: Arc<ApiClient>,
}

impl RemoteFavorites {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl FavoritesSource for RemoteFavorites {
    async fn list(&self) -> Result<Vec<MovieSummary>, SourceError> {
        Ok(self.api.list_favorites().await?)
    }

    async fn add(&self, movie: &MovieSummary) -> Result<(), SourceError> {
        if let Err(e) = schema::validate_summary(movie) {
            warn!("Invalid movie object: {}", e);
            return Ok(());
        }
        self.api.add_favorite(&movie.imdb_id).await?;
        Ok(())
    }

    async fn remove(&self, imdb_id: &str) -> Result<(), SourceError> {
        if let Err(e) = schema::validate_identifier(imdb_id) {
            warn!("Refusing to remove favorite: {}", e);
            return Ok(());
        }
        self.api.remove_favorite(imdb_id).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SourceError> {
        self.api.clear_favorites().await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
