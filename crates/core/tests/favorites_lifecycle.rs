//! Favorites lifecycle integration tests.
//!
//! These tests drive a local session (SQLite key-value store, seeded
//! catalog) through reads, optimistic writes and rollbacks:
//! read -> add -> remove -> clear, with storage failures in between.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use marquee_core::{
    favorites::{KeyValueStore, MemoryKeyValueStore, DEFAULT_STORAGE_KEY},
    testing::fixtures,
    FavoritesRepository, LocalFavoritesBackend, MovieSession, MutationError, QueryCacheConfig,
    QueryKey, SourceError, SqliteKeyValueStore, StaticCatalog,
};

/// Test helper wiring a session to a repository over an on-disk store.
struct TestHarness {
    repository: FavoritesRepository,
    session: MovieSession,
    temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = Self::open_repository(&temp_dir);
        let session = MovieSession::local(
            repository.clone(),
            Arc::new(StaticCatalog::seeded()),
            QueryCacheConfig::default(),
        );

        Self {
            repository,
            session,
            temp_dir,
        }
    }

    fn open_repository(temp_dir: &TempDir) -> FavoritesRepository {
        let store = SqliteKeyValueStore::new(&temp_dir.path().join("favorites.db"))
            .expect("Failed to open store");
        FavoritesRepository::new(Arc::new(LocalFavoritesBackend::new(Arc::new(store))))
    }
}

fn ids(movies: &[marquee_core::MovieSummary]) -> Vec<&str> {
    movies.iter().map(|m| m.imdb_id.as_str()).collect()
}

#[tokio::test]
async fn test_full_lifecycle() {
    let harness = TestHarness::new();
    let session = &harness.session;

    assert!(session.favorites().await.unwrap().is_empty());

    for id in ["a", "b", "c"] {
        session.add_favorite(fixtures::movie(id)).await.unwrap();
    }
    assert_eq!(ids(&session.favorites().await.unwrap()), vec!["a", "b", "c"]);

    session.remove_favorite("b").await.unwrap();
    assert_eq!(ids(&session.favorites().await.unwrap()), vec!["a", "c"]);

    session.clear_favorites().await.unwrap();
    assert!(session.favorites().await.unwrap().is_empty());
    assert!(harness.repository.get().is_empty());
}

#[tokio::test]
async fn test_favorites_persist_across_reopen() {
    let harness = TestHarness::new();
    harness
        .session
        .add_favorite(fixtures::movie("tt0076759"))
        .await
        .unwrap();

    let reopened = TestHarness::open_repository(&harness.temp_dir);
    assert!(reopened.is_favorite("tt0076759"));
    assert_eq!(reopened.get(), vec![fixtures::movie("tt0076759")]);
}

#[tokio::test]
async fn test_rollback_when_storage_fails() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let repository =
        FavoritesRepository::new(Arc::new(LocalFavoritesBackend::new(store.clone())));
    let session = MovieSession::local(
        repository.clone(),
        Arc::new(StaticCatalog::seeded()),
        QueryCacheConfig::default(),
    );

    session.add_favorite(fixtures::movie("A")).await.unwrap();
    session.add_favorite(fixtures::movie("B")).await.unwrap();
    session.favorites().await.unwrap();

    store.set_failing(true);
    let err = session.remove_favorite("A").await.unwrap_err();
    assert!(matches!(err, MutationError::Write(SourceError::Storage(_))));

    let cached = session
        .cache()
        .get_data(&QueryKey::Favorites)
        .and_then(|data| data.into_favorites())
        .unwrap();
    assert_eq!(ids(&cached), vec!["A", "B"]);

    // Reads fail soft while storage is down.
    assert!(session.favorites().await.unwrap().is_empty());

    store.set_failing(false);
    assert_eq!(ids(&session.favorites().await.unwrap()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_legacy_records_are_dropped_on_read() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let stored = json!([
        fixtures::movie_json("keep"),
        { "imdbID": "legacy", "Title": "Old shape" },
        fixtures::movie_json("keep"),
    ]);
    store
        .put(DEFAULT_STORAGE_KEY, &stored.to_string())
        .unwrap();

    let repository = FavoritesRepository::new(Arc::new(LocalFavoritesBackend::new(store)));

    assert_eq!(ids(&repository.get()), vec!["keep"]);
    assert!(!repository.is_favorite("legacy"));
}

#[tokio::test]
async fn test_search_through_local_session() {
    let harness = TestHarness::new();

    let page = harness
        .session
        .search(marquee_core::SearchQuery::new("se", 1).with_page_size(50))
        .await
        .unwrap();

    assert!(page.items.iter().any(|m| m.title == "Se7en"));
    assert!(page
        .items
        .iter()
        .all(|m| m.title.to_lowercase().contains("se")));
}
