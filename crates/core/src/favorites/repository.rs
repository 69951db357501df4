//! The favorites repository.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::{FavoritesBackend, PersistenceError};
use crate::metrics::FAVORITES_WRITES;
use crate::movie::{schema, MovieSummary};

/// What a mutating repository call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The collection changed and was persisted.
    Applied,
    /// The collection was already in the requested state.
    Unchanged,
    /// The input failed validation; nothing was written.
    Rejected,
}

/// Reads and writes the favorites collection through a backend.
///
/// Invariants: no two stored records share an identifier, every stored record
/// passes the shape check, and order is insertion order. Reads always go to the
/// backend; there is no repository-level cache.
///
/// Validation failures are logged and reported as [`WriteOutcome::Rejected`],
/// never as errors. Only a failed backend write produces `Err`.
#[derive(Clone)]
pub struct FavoritesRepository {
    backend: Arc<dyn FavoritesBackend>,
}

impl FavoritesRepository {
    pub fn new(backend: Arc<dyn FavoritesBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Current favorites. Never fails: an unreadable backend reads as empty.
    pub fn get(&self) -> Vec<MovieSummary> {
        match self.backend.load() {
            Ok(favorites) => favorites,
            Err(e) => {
                error!("Error reading favorites from {}: {}", self.backend.name(), e);
                Vec::new()
            }
        }
    }

    /// Append a movie unless it is already present.
    pub fn add(&self, movie: MovieSummary) -> Result<WriteOutcome, PersistenceError> {
        let result = self.try_add(movie);
        self.record(&result);
        result
    }

    fn try_add(&self, movie: MovieSummary) -> Result<WriteOutcome, PersistenceError> {
        if let Err(e) = schema::validate_summary(&movie) {
            warn!("Invalid movie object: {}", e);
            return Ok(WriteOutcome::Rejected);
        }
        if !self.backend.accepts(&movie) {
            warn!(
                "Movie {} cannot be stored by the {} backend",
                movie.imdb_id,
                self.backend.name()
            );
            return Ok(WriteOutcome::Rejected);
        }

        let mut favorites = self.get();
        if favorites.iter().any(|m| m.same_movie(&movie)) {
            debug!("Movie already in favorites: {}", movie.imdb_id);
            return Ok(WriteOutcome::Unchanged);
        }

        favorites.push(movie);
        self.persist(&favorites)?;
        Ok(WriteOutcome::Applied)
    }

    /// Like [`add`](Self::add), for records that arrive untyped.
    pub fn add_value(&self, value: &Value) -> Result<WriteOutcome, PersistenceError> {
        match schema::parse_summary(value) {
            Ok(movie) => self.add(movie),
            Err(e) => {
                warn!("Invalid movie object: {}", e);
                let result = Ok(WriteOutcome::Rejected);
                self.record(&result);
                result
            }
        }
    }

    /// Remove a movie by identifier.
    ///
    /// The collection is rewritten even when nothing matched.
    pub fn remove(&self, imdb_id: &str) -> Result<WriteOutcome, PersistenceError> {
        let result = self.try_remove(imdb_id);
        self.record(&result);
        result
    }

    fn try_remove(&self, imdb_id: &str) -> Result<WriteOutcome, PersistenceError> {
        if let Err(e) = schema::validate_identifier(imdb_id) {
            warn!("Refusing to remove favorite: {}", e);
            return Ok(WriteOutcome::Rejected);
        }

        let mut favorites = self.get();
        let before = favorites.len();
        favorites.retain(|m| m.imdb_id != imdb_id);
        let changed = favorites.len() != before;

        self.persist(&favorites)?;
        Ok(if changed {
            WriteOutcome::Applied
        } else {
            WriteOutcome::Unchanged
        })
    }

    /// Whether a movie is in the collection. Invalid identifiers are never favorites.
    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        if schema::validate_identifier(imdb_id).is_err() {
            return false;
        }
        self.get().iter().any(|m| m.imdb_id == imdb_id)
    }

    /// Persist an empty collection.
    pub fn clear(&self) -> Result<WriteOutcome, PersistenceError> {
        let result = self.persist(&[]).map(|_| WriteOutcome::Applied);
        self.record(&result);
        result
    }

    fn record(&self, result: &Result<WriteOutcome, PersistenceError>) {
        let outcome = match result {
            Ok(WriteOutcome::Applied) => "applied",
            Ok(WriteOutcome::Unchanged) => "unchanged",
            Ok(WriteOutcome::Rejected) => "rejected",
            Err(_) => "failed",
        };
        FAVORITES_WRITES
            .with_label_values(&[self.backend.name(), outcome])
            .inc();
    }

    fn persist(&self, favorites: &[MovieSummary]) -> Result<(), PersistenceError> {
        self.backend.save(favorites).map_err(|e| {
            error!("Error saving favorites to {}: {}", self.backend.name(), e);
            e
        })
    }
}
