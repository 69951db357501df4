//! Data sources the client layer reads from and writes to.
//!
//! A source is where authoritative data lives. The same session code runs
//! against local sources (a [`FavoritesRepository`](crate::favorites::FavoritesRepository)
//! and a [`MovieCatalog`](crate::catalog::MovieCatalog) in-process) or remote
//! ones (the HTTP API, see [`crate::client`]).

mod local;

pub use local::{CatalogMovies, LocalFavorites};

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::client::ApiError;
use crate::favorites::PersistenceError;
use crate::movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};

/// Errors from any data source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] PersistenceError),

    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}

impl From<CatalogError> for SourceError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => SourceError::NotFound(id),
            CatalogError::InvalidQuery(msg) => SourceError::InvalidQuery(msg),
        }
    }
}

impl SourceError {
    /// HTTP status carried by the error, if it came from the API.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Api(e) => e.status(),
            SourceError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Where the favorites collection is read from and written to.
///
/// Writes that fail validation are not errors; they are logged by the
/// implementation and the collection stays as it was.
#[async_trait]
pub trait FavoritesSource: Send + Sync {
    /// Read the authoritative collection.
    async fn list(&self) -> Result<Vec<MovieSummary>, SourceError>;

    async fn add(&self, movie: &MovieSummary) -> Result<(), SourceError>;

    async fn remove(&self, imdb_id: &str) -> Result<(), SourceError>;

    async fn clear(&self) -> Result<(), SourceError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Search and detail provider.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SourceError>;

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
