pub mod catalog;
pub mod client;
pub mod config;
pub mod favorites;
pub mod metrics;
pub mod movie;
pub mod mutation;
pub mod query;
pub mod source;
pub mod testing;

pub use catalog::{CatalogError, MovieCatalog, StaticCatalog};
pub use client::{ApiClient, ApiError, MovieSession, RemoteFavorites};
pub use config::{
    load_config, load_config_from_str, validate_config, ClientConfig, Config, ConfigError,
    FavoritesBackendKind, SanitizedConfig,
};
pub use favorites::{
    FavoritesBackend, FavoritesRepository, InMemoryFavoritesBackend, LocalFavoritesBackend,
    PersistenceError, SqliteKeyValueStore, WriteOutcome,
};
pub use movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};
pub use mutation::{MutationCoordinator, MutationError, MutationState};
pub use query::{QueryCache, QueryCacheConfig, QueryError, QueryKey, QueryState};
pub use source::{FavoritesSource, MovieSource, SourceError};
