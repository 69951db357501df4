//! The facade UI code talks to.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use super::{ApiClient, ApiError, RemoteFavorites};
use crate::catalog::MovieCatalog;
use crate::config::ClientConfig;
use crate::favorites::FavoritesRepository;
use crate::movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};
use crate::mutation::{
    AddFavorite, ClearFavorites, MutationCoordinator, MutationError, MutationState,
    RemoveFavorite,
};
use crate::query::{QueryCache, QueryCacheConfig, QueryData, QueryError, QueryKey, QuerySnapshot};
use crate::source::{CatalogMovies, FavoritesSource, LocalFavorites, MovieSource};

/// Cached reads and optimistic writes over a pair of sources.
///
/// Favorites are refetched on every read. Search and detail results are
/// cached per parameters; moving to a new search discards the previous one.
pub struct MovieSession {
    cache: Arc<QueryCache>,
    favorites: Arc<dyn FavoritesSource>,
    movies: Arc<dyn MovieSource>,
    add: MutationCoordinator<AddFavorite>,
    remove: MutationCoordinator<RemoveFavorite>,
    clear: MutationCoordinator<ClearFavorites>,
    current_search: Mutex<Option<SearchQuery>>,
}

impl MovieSession {
    pub fn new(
        favorites: Arc<dyn FavoritesSource>,
        movies: Arc<dyn MovieSource>,
        config: QueryCacheConfig,
    ) -> Self {
        let cache = Arc::new(QueryCache::new(config));
        Self {
            add: MutationCoordinator::new(AddFavorite, cache.clone(), favorites.clone()),
            remove: MutationCoordinator::new(RemoveFavorite, cache.clone(), favorites.clone()),
            clear: MutationCoordinator::new(ClearFavorites, cache.clone(), favorites.clone()),
            cache,
            favorites,
            movies,
            current_search: Mutex::new(None),
        }
    }

    /// Session over an in-process repository and catalog.
    pub fn local(
        repository: FavoritesRepository,
        catalog: Arc<dyn MovieCatalog>,
        config: QueryCacheConfig,
    ) -> Self {
        Self::new(
            Arc::new(LocalFavorites::new(repository)),
            Arc::new(CatalogMovies::new(catalog)),
            config,
        )
    }

    /// Session over the HTTP API.
    pub fn remote(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = Arc::new(ApiClient::from_config(config)?);
        Ok(Self::new(
            Arc::new(RemoteFavorites::new(api.clone())),
            api,
            QueryCacheConfig {
                search_stale_time: config.search_stale_secs.map(Duration::from_secs),
            },
        ))
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Read favorites from the source, updating the cache.
    pub async fn favorites(&self) -> Result<Vec<MovieSummary>, QueryError> {
        let source = self.favorites.clone();
        let data = self
            .cache
            .fetch(QueryKey::Favorites, move || {
                async move { Ok::<_, QueryError>(QueryData::Favorites(source.list().await?)) }
            })
            .await?;
        data.into_favorites()
            .ok_or(QueryError::UnexpectedData("favorites"))
    }

    /// Whether the cached favorites contain `imdb_id`. Does not fetch.
    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.cache
            .get_data(&QueryKey::Favorites)
            .and_then(|data| {
                data.as_favorites()
                    .map(|movies| movies.iter().any(|m| m.imdb_id == imdb_id))
            })
            .unwrap_or(false)
    }

    pub async fn search(&self, query: SearchQuery) -> Result<SearchPage, QueryError> {
        self.replace_current_search(&query);

        let movies = self.movies.clone();
        let params = query.clone();
        let data = self
            .cache
            .fetch(QueryKey::Search(query), move || {
                async move { Ok::<_, QueryError>(QueryData::Search(movies.search(&params).await?)) }
            })
            .await?;
        data.into_search().ok_or(QueryError::UnexpectedData("search"))
    }

    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, QueryError> {
        let movies = self.movies.clone();
        let id = imdb_id.to_string();
        let data = self
            .cache
            .fetch(QueryKey::Detail(imdb_id.to_string()), move || {
                async move {
                    Ok::<_, QueryError>(QueryData::Detail(Box::new(movies.detail(&id).await?)))
                }
            })
            .await?;
        data.into_detail().ok_or(QueryError::UnexpectedData("detail"))
    }

    pub async fn add_favorite(&self, movie: MovieSummary) -> Result<(), MutationError> {
        self.add.mutate(movie).await
    }

    pub async fn remove_favorite(&self, imdb_id: &str) -> Result<(), MutationError> {
        self.remove.mutate(imdb_id.to_string()).await
    }

    pub async fn clear_favorites(&self) -> Result<(), MutationError> {
        self.clear.mutate(()).await
    }

    /// Add if absent, remove if present, judged by the cached favorites.
    pub async fn toggle_favorite(&self, movie: MovieSummary) -> Result<(), MutationError> {
        if self.is_favorite(&movie.imdb_id) {
            self.remove_favorite(&movie.imdb_id).await
        } else {
            self.add_favorite(movie).await
        }
    }

    pub fn watch_favorites(&self) -> watch::Receiver<QuerySnapshot> {
        self.cache.subscribe(QueryKey::Favorites)
    }

    /// Whether any favorites mutation is currently being written.
    pub fn is_mutating(&self) -> bool {
        [self.add.state(), self.remove.state(), self.clear.state()]
            .iter()
            .any(MutationState::is_mutating)
    }

    fn replace_current_search(&self, query: &SearchQuery) {
        let mut current = self
            .current_search
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if current.as_ref() == Some(query) {
            return;
        }
        if let Some(previous) = current.replace(query.clone()) {
            debug!("Search changed, discarding results for {:?}", previous);
            self.cache.remove(&QueryKey::Search(previous));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use crate::testing::{fixtures, MockFavoritesSource, MockMovieSource};

    fn session() -> (MovieSession, Arc<MockFavoritesSource>, Arc<MockMovieSource>) {
        let favorites = Arc::new(MockFavoritesSource::new());
        let movies = Arc::new(MockMovieSource::new());
        let session = MovieSession::new(
            favorites.clone(),
            movies.clone(),
            QueryCacheConfig::default(),
        );
        (session, favorites, movies)
    }

    #[tokio::test]
    async fn test_favorites_read_every_time() {
        let (session, favorites, _) = session();
        favorites.set_favorites(vec![fixtures::movie("a")]).await;

        assert_eq!(session.favorites().await.unwrap(), vec![fixtures::movie("a")]);
        favorites
            .set_favorites(vec![fixtures::movie("a"), fixtures::movie("b")])
            .await;
        assert_eq!(session.favorites().await.unwrap().len(), 2);
        assert_eq!(favorites.list_count().await, 2);
    }

    #[tokio::test]
    async fn test_search_cached_until_parameters_change() {
        let (session, _, movies) = session();
        let star_wars = SearchQuery::new("star wars", 1);

        let page = session.search(star_wars.clone()).await.unwrap();
        assert_eq!(page.total_results, 2);
        session.search(star_wars.clone()).await.unwrap();
        assert_eq!(movies.search_count().await, 1);

        session.search(SearchQuery::new("matrix", 1)).await.unwrap();
        assert!(session
            .cache()
            .snapshot(&QueryKey::Search(star_wars.clone()))
            .is_none());

        session.search(star_wars).await.unwrap();
        assert_eq!(movies.search_count().await, 3);
    }

    #[tokio::test]
    async fn test_detail_cached() {
        let (session, _, movies) = session();

        let detail = session.detail("tt0468569").await.unwrap();
        assert_eq!(detail.summary.title, "The Dark Knight");
        session.detail("tt0468569").await.unwrap();
        assert_eq!(movies.detail_count().await, 1);

        let err = session.detail("tt9999999").await.unwrap_err();
        assert_eq!(
            err,
            QueryError::Source(SourceError::NotFound("tt9999999".to_string()))
        );
    }

    #[tokio::test]
    async fn test_toggle_and_is_favorite() {
        let (session, favorites, _) = session();
        session.favorites().await.unwrap();

        session.toggle_favorite(fixtures::movie("a")).await.unwrap();
        assert!(session.is_favorite("a"));
        assert_eq!(favorites.favorites().await, vec![fixtures::movie("a")]);

        session.toggle_favorite(fixtures::movie("a")).await.unwrap();
        assert!(!session.is_favorite("a"));
        assert!(favorites.favorites().await.is_empty());
        assert!(!session.is_mutating());
    }

    #[tokio::test]
    async fn test_failed_write_surfaces_and_rolls_back() {
        let (session, favorites, _) = session();
        favorites
            .set_favorites(vec![fixtures::movie("a"), fixtures::movie("b")])
            .await;
        session.favorites().await.unwrap();

        favorites.set_next_error(fixtures::storage_error()).await;
        let err = session.clear_favorites().await.unwrap_err();

        assert_eq!(err, MutationError::Write(fixtures::storage_error()));
        assert!(session.is_favorite("a"));
        assert!(session.is_favorite("b"));
        assert_eq!(session.favorites().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_watch_favorites_sees_optimistic_update() {
        let (session, _, _) = session();
        let mut rx = session.watch_favorites();
        rx.borrow_and_update();

        session.add_favorite(fixtures::movie("a")).await.unwrap();

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(
            snapshot.state.data(),
            Some(&QueryData::Favorites(vec![fixtures::movie("a")]))
        );
        assert!(snapshot.is_stale);
    }
}
