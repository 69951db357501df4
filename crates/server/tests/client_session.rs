//! The client session talking to a real server over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use marquee_core::{
    ApiError, ClientConfig, Config, FavoritesRepository, InMemoryFavoritesBackend, MovieCatalog,
    MovieSession, MovieSummary, MutationError, QueryError, SearchQuery, SourceError,
    StaticCatalog,
};
use marquee_server::state::AppState;

/// Serve a fresh app on an ephemeral port.
async fn spawn_app() -> SocketAddr {
    let catalog: Arc<dyn MovieCatalog> = Arc::new(StaticCatalog::seeded());
    let favorites =
        FavoritesRepository::new(Arc::new(InMemoryFavoritesBackend::new(Arc::clone(&catalog))));
    let state = Arc::new(AppState::new(Config::default(), catalog, favorites));
    let app = marquee_server::api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn session_for(addr: SocketAddr) -> MovieSession {
    MovieSession::remote(&ClientConfig {
        base_url: format!("http://{}/api", addr),
        timeout_secs: 5,
        search_stale_secs: None,
    })
    .unwrap()
}

fn catalog_movie(imdb_id: &str) -> MovieSummary {
    StaticCatalog::seeded().summary(imdb_id).unwrap()
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let session = session_for(spawn_app().await);

    assert!(session.favorites().await.unwrap().is_empty());

    session
        .add_favorite(catalog_movie("tt0133093"))
        .await
        .unwrap();
    session
        .add_favorite(catalog_movie("tt0110912"))
        .await
        .unwrap();
    assert!(session.is_favorite("tt0133093"));

    let favorites = session.favorites().await.unwrap();
    assert_eq!(
        favorites,
        vec![catalog_movie("tt0133093"), catalog_movie("tt0110912")]
    );

    session.remove_favorite("tt0133093").await.unwrap();
    assert_eq!(
        session.favorites().await.unwrap(),
        vec![catalog_movie("tt0110912")]
    );

    session.clear_favorites().await.unwrap();
    assert!(session.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_write_rolls_back() {
    let session = session_for(spawn_app().await);
    session.favorites().await.unwrap();

    let unknown = MovieSummary::new("tt0000000", "Unknown", "2000", "movie", "N/A");
    let err = session.add_favorite(unknown).await.unwrap_err();

    match err {
        MutationError::Write(SourceError::Api(ApiError::Request { status, .. })) => {
            assert_eq!(status, Some(404))
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!session.is_favorite("tt0000000"));
    assert!(session.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_record_is_not_sent() {
    let session = session_for(spawn_app().await);
    let invalid = MovieSummary::new("", "No id", "2000", "movie", "N/A");

    session.add_favorite(invalid).await.unwrap();

    assert!(session.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_and_detail() {
    let session = session_for(spawn_app().await);

    let page = session
        .search(SearchQuery::new("lord of the rings", 1))
        .await
        .unwrap();
    assert_eq!(page.total_results, 2);
    assert_eq!(page.total_pages, 1);

    let detail = session.detail("tt0167260").await.unwrap();
    assert_eq!(
        detail.summary.title,
        "The Lord of the Rings: The Return of the King"
    );

    let err = session.detail("tt0000000").await.unwrap_err();
    assert_eq!(
        err,
        QueryError::Source(SourceError::Api(ApiError::Request {
            message: "Movie not found: tt0000000".to_string(),
            status: Some(404),
        }))
    );
}

#[tokio::test]
async fn test_unreachable_server_has_no_status() {
    // Bind and drop to get a port nothing listens on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let session = session_for(addr);

    let err = session.favorites().await.unwrap_err();
    match err {
        QueryError::Source(SourceError::Api(ApiError::Request { status, .. })) => {
            assert_eq!(status, None)
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
