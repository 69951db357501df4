//! Favorites persistence: backends and the repository that guards them.
//!
//! Two interchangeable backends sit behind [`FavoritesBackend`]:
//! - [`LocalFavoritesBackend`] keeps full records as one JSON blob in a
//!   [`KeyValueStore`] (the browser-storage model).
//! - [`InMemoryFavoritesBackend`] keeps identifiers only and rehydrates them
//!   from a [`crate::catalog::MovieCatalog`] (the server model).
//!
//! Only one is active per process. [`FavoritesRepository`] enforces the
//! collection invariants on top of whichever one is injected.

mod error;
mod kv;
mod local;
mod memory;
mod repository;

pub use error::PersistenceError;
pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use local::{LocalFavoritesBackend, DEFAULT_STORAGE_KEY};
pub use memory::InMemoryFavoritesBackend;
pub use repository::{FavoritesRepository, WriteOutcome};

use crate::movie::MovieSummary;

/// Storage medium for the favorites collection.
///
/// Backends persist and return whole collections; they do not enforce
/// uniqueness or ordering rules beyond what they physically store.
pub trait FavoritesBackend: Send + Sync {
    /// Read the stored collection. A never-written backend reads as empty.
    fn load(&self) -> Result<Vec<MovieSummary>, PersistenceError>;

    /// Replace the stored collection.
    fn save(&self, favorites: &[MovieSummary]) -> Result<(), PersistenceError>;

    /// Whether a record saved now would come back from [`load`](Self::load).
    fn accepts(&self, _movie: &MovieSummary) -> bool {
        true
    }

    /// Short name for logs and the config endpoint.
    fn name(&self) -> &'static str;
}
