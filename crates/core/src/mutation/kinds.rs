//! The three favorites mutations.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::movie::{schema, MovieSummary};
use crate::source::{FavoritesSource, SourceError};

/// One kind of favorites mutation: how to predict its effect and how to
/// perform it against the source of truth.
#[async_trait]
pub trait FavoritesMutation: Send + Sync + 'static {
    type Input: Debug + Clone + Send + Sync;

    /// Label used in logs and metrics.
    fn kind(&self) -> &'static str;

    /// The collection as it should look once the write succeeds.
    fn predict(&self, current: &[MovieSummary], input: &Self::Input) -> Vec<MovieSummary>;

    async fn commit(
        &self,
        source: &dyn FavoritesSource,
        input: &Self::Input,
    ) -> Result<(), SourceError>;
}

/// Append a movie unless its identifier is already present.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddFavorite;

#[async_trait]
impl FavoritesMutation for AddFavorite {
    type Input = MovieSummary;

    fn kind(&self) -> &'static str {
        "add"
    }

    fn predict(&self, current: &[MovieSummary], movie: &MovieSummary) -> Vec<MovieSummary> {
        let mut next = current.to_vec();
        // Invalid records never reach storage, so they never reach the cache either.
        if schema::validate_summary(movie).is_ok() && !next.iter().any(|m| m.same_movie(movie)) {
            next.push(movie.clone());
        }
        next
    }

    async fn commit(
        &self,
        source: &dyn FavoritesSource,
        movie: &MovieSummary,
    ) -> Result<(), SourceError> {
        source.add(movie).await
    }
}

/// Filter out a movie by identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveFavorite;

#[async_trait]
impl FavoritesMutation for RemoveFavorite {
    type Input = String;

    fn kind(&self) -> &'static str {
        "remove"
    }

    fn predict(&self, current: &[MovieSummary], imdb_id: &String) -> Vec<MovieSummary> {
        current
            .iter()
            .filter(|m| &m.imdb_id != imdb_id)
            .cloned()
            .collect()
    }

    async fn commit(
        &self,
        source: &dyn FavoritesSource,
        imdb_id: &String,
    ) -> Result<(), SourceError> {
        source.remove(imdb_id).await
    }
}

/// Empty the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearFavorites;

#[async_trait]
impl FavoritesMutation for ClearFavorites {
    type Input = ();

    fn kind(&self) -> &'static str {
        "clear"
    }

    fn predict(&self, _current: &[MovieSummary], _input: &()) -> Vec<MovieSummary> {
        Vec::new()
    }

    async fn commit(&self, source: &dyn FavoritesSource, _input: &()) -> Result<(), SourceError> {
        source.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> MovieSummary {
        MovieSummary::new(id, "Goodfellas", "1990", "movie", "/goodfellas.jpg")
    }

    #[test]
    fn test_add_prediction() {
        let current = vec![movie("a")];

        assert_eq!(
            AddFavorite.predict(&current, &movie("b")),
            vec![movie("a"), movie("b")]
        );
        assert_eq!(AddFavorite.predict(&current, &movie("a")), current);
    }

    #[test]
    fn test_add_prediction_skips_invalid_record() {
        let invalid = MovieSummary::new("  ", "Goodfellas", "1990", "movie", "N/A");
        assert!(AddFavorite.predict(&[], &invalid).is_empty());
    }

    #[test]
    fn test_remove_prediction() {
        let current = vec![movie("a"), movie("b")];

        assert_eq!(
            RemoveFavorite.predict(&current, &"a".to_string()),
            vec![movie("b")]
        );
        assert_eq!(RemoveFavorite.predict(&current, &"zzz".to_string()), current);
    }

    #[test]
    fn test_clear_prediction() {
        assert!(ClearFavorites.predict(&[movie("a"), movie("b")], &()).is_empty());
    }
}
