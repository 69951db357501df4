//! Testing utilities and mock implementations.
//!
//! Mocks for the source traits, so sessions and coordinators can be exercised
//! without a server or on-disk storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MockFavoritesSource, MockMovieSource};
//!
//! let favorites = MockFavoritesSource::with_favorites(vec![fixtures::movie("tt1")]);
//! let movies = MockMovieSource::new();
//!
//! // Inject a failure for the next write
//! favorites.set_next_error(fixtures::storage_error()).await;
//! ```

mod mock_favorites_source;
mod mock_movie_source;

pub use mock_favorites_source::{MockFavoritesSource, RecordedWrite};
pub use mock_movie_source::MockMovieSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::favorites::PersistenceError;
    use crate::movie::MovieSummary;
    use crate::source::SourceError;

    /// A valid movie summary with the given identifier.
    pub fn movie(imdb_id: &str) -> MovieSummary {
        MovieSummary::new(
            imdb_id,
            format!("Movie {}", imdb_id),
            "2001",
            "movie",
            format!("https://img.example.com/{}.jpg", imdb_id),
        )
    }

    /// A summary as it appears on the wire.
    pub fn movie_json(imdb_id: &str) -> Value {
        json!({
            "imdbID": imdb_id,
            "Title": format!("Movie {}", imdb_id),
            "Year": "2001",
            "Type": "movie",
            "Poster": format!("https://img.example.com/{}.jpg", imdb_id),
        })
    }

    /// The error a full local store produces.
    pub fn storage_error() -> SourceError {
        SourceError::Storage(PersistenceError::Unavailable(
            "storage quota exceeded".to_string(),
        ))
    }
}
