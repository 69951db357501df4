//! Types for the movie catalog.

use thiserror::Error;

/// Errors for catalog operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}
