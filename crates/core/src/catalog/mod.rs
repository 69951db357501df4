//! Movie catalog: the search and detail provider.
//!
//! The favorites layer only depends on the [`MovieCatalog`] trait. The bundled
//! [`StaticCatalog`] serves a fixed, in-memory list of movies, which is all the
//! mock API needs.

mod seed;
mod static_catalog;
mod types;

pub use static_catalog::StaticCatalog;
pub use types::*;

use crate::movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};

/// Trait for movie catalog providers.
pub trait MovieCatalog: Send + Sync {
    /// Search the catalog by title.
    ///
    /// Matching is a case-insensitive substring test; an empty query matches
    /// every movie. Results are paginated per `query.page`/`query.page_size`.
    fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError>;

    /// Get the full record for a movie.
    fn get(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError>;

    /// Get the summary record for a movie, if the catalog knows it.
    fn summary(&self, imdb_id: &str) -> Option<MovieSummary>;

    /// Number of movies in the catalog.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
