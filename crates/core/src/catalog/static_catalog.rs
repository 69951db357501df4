//! In-memory movie catalog backed by a fixed list.

use std::cmp::Ordering;

use tracing::debug;

use super::{seed, CatalogError, MovieCatalog};
use crate::movie::{
    MovieDetail, MovieSummary, OrderBy, SearchPage, SearchQuery, SortDirection, MAX_PAGE_SIZE,
};

/// Read-only catalog holding every movie in memory, in insertion order.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    movies: Vec<MovieDetail>,
}

impl StaticCatalog {
    /// Create a catalog from an explicit movie list.
    ///
    /// Later duplicates of an identifier are ignored.
    pub fn new(movies: Vec<MovieDetail>) -> Self {
        let mut unique: Vec<MovieDetail> = Vec::with_capacity(movies.len());
        for movie in movies {
            if !unique.iter().any(|m| m.imdb_id() == movie.imdb_id()) {
                unique.push(movie);
            }
        }
        Self { movies: unique }
    }

    /// Create a catalog with the built-in movie list.
    pub fn seeded() -> Self {
        Self::new(seed::seed_movies())
    }

    fn find(&self, imdb_id: &str) -> Option<&MovieDetail> {
        self.movies.iter().find(|m| m.imdb_id() == imdb_id)
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MovieCatalog for StaticCatalog {
    fn search(&self, query: &SearchQuery) -> Result<SearchPage, CatalogError> {
        if query.page == 0 {
            return Err(CatalogError::InvalidQuery("page must be >= 1".to_string()));
        }
        if query.page_size == 0 || query.page_size > MAX_PAGE_SIZE {
            return Err(CatalogError::InvalidQuery(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let needle = query.query.trim().to_lowercase();
        let mut matches: Vec<&MovieSummary> = self
            .movies
            .iter()
            .map(|m| &m.summary)
            .filter(|m| needle.is_empty() || m.title.to_lowercase().contains(&needle))
            .collect();

        if let Some(order_by) = query.order_by {
            matches.sort_by(|a, b| {
                let ordering = compare(a, b, order_by);
                match query.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        let total_results = matches.len() as u32;
        let total_pages = total_results.div_ceil(query.page_size).max(1);
        let start = ((query.page - 1) as usize).saturating_mul(query.page_size as usize);

        let items: Vec<MovieSummary> = matches
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        debug!(
            "Catalog search: query='{}', page={}, matched={}, returned={}",
            query.query,
            query.page,
            total_results,
            items.len()
        );

        Ok(SearchPage {
            items,
            page: query.page,
            total_pages,
            total_results,
        })
    }

    fn get(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        self.find(imdb_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(imdb_id.to_string()))
    }

    fn summary(&self, imdb_id: &str) -> Option<MovieSummary> {
        self.find(imdb_id).map(|m| m.summary.clone())
    }

    fn len(&self) -> usize {
        self.movies.len()
    }
}

fn compare(a: &MovieSummary, b: &MovieSummary, order_by: OrderBy) -> Ordering {
    match order_by {
        OrderBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        OrderBy::Year => a.year.cmp(&b.year),
        OrderBy::ImdbId => a.imdb_id.cmp(&b.imdb_id),
        OrderBy::Type => a.media_type.cmp(&b.media_type),
    }
}
