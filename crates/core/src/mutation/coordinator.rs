use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::FavoritesMutation;
use crate::metrics::{MUTATIONS_TOTAL, MUTATION_DURATION};
use crate::query::{QueryCache, QueryData, QueryKey};
use crate::source::{FavoritesSource, SourceError};

/// Errors from a mutation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MutationError {
    /// The write failed and the optimistic value was rolled back.
    #[error("Favorites write failed: {0}")]
    Write(#[from] SourceError),
}

/// Lifecycle of the most recent invocation of a coordinator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Mutating,
    Settled(Result<(), MutationError>),
}

impl MutationState {
    pub fn is_mutating(&self) -> bool {
        matches!(self, MutationState::Mutating)
    }
}

/// Runs one kind of favorites mutation optimistically against the query cache.
///
/// Writes are not retried and overlapping invocations are not ordered with
/// respect to each other; whichever write lands last wins at the source.
pub struct MutationCoordinator<M: FavoritesMutation> {
    mutation: M,
    cache: Arc<QueryCache>,
    source: Arc<dyn FavoritesSource>,
    state: watch::Sender<MutationState>,
}

impl<M: FavoritesMutation> MutationCoordinator<M> {
    pub fn new(mutation: M, cache: Arc<QueryCache>, source: Arc<dyn FavoritesSource>) -> Self {
        let (state, _) = watch::channel(MutationState::Idle);
        Self {
            mutation,
            cache,
            source,
            state,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }

    /// Apply the mutation optimistically and write it through.
    ///
    /// On failure the cached favorites are restored to exactly what they were
    /// before the call, including "never fetched".
    pub async fn mutate(&self, input: M::Input) -> Result<(), MutationError> {
        let kind = self.mutation.kind();
        let key = QueryKey::Favorites;

        if self.cache.cancel(&key) {
            debug!("Cancelled favorites refetch before {} mutation", kind);
        }
        let snapshot = self.cache.get_data(&key);
        let current = snapshot
            .as_ref()
            .and_then(QueryData::as_favorites)
            .unwrap_or(&[]);
        let predicted = self.mutation.predict(current, &input);
        self.cache.set_data(key.clone(), QueryData::Favorites(predicted));
        self.state.send_replace(MutationState::Mutating);

        debug!("Committing {} mutation: {:?}", kind, input);
        let start = Instant::now();
        let result = self.mutation.commit(self.source.as_ref(), &input).await;
        MUTATION_DURATION
            .with_label_values(&[kind])
            .observe(start.elapsed().as_secs_f64());

        let result = match result {
            Ok(()) => {
                info!("Favorites {} mutation committed to {}", kind, self.source.name());
                MUTATIONS_TOTAL.with_label_values(&[kind, "success"]).inc();
                Ok(())
            }
            Err(e) => {
                warn!("Favorites {} mutation failed, rolling back: {}", kind, e);
                MUTATIONS_TOTAL.with_label_values(&[kind, "rolled_back"]).inc();
                self.cache.restore(key.clone(), snapshot);
                Err(MutationError::Write(e))
            }
        };

        self.cache.invalidate(&key);
        self.state.send_replace(MutationState::Settled(result.clone()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{FavoritesRepository, LocalFavoritesBackend, MemoryKeyValueStore};
    use crate::movie::MovieSummary;
    use crate::mutation::{AddFavorite, ClearFavorites, RemoveFavorite};
    use crate::source::LocalFavorites;
    use crate::testing::{fixtures, MockFavoritesSource};
    use futures::FutureExt;
    use std::time::Duration;

    fn seeded(ids: &[&str]) -> Vec<MovieSummary> {
        ids.iter().map(|id| fixtures::movie(id)).collect()
    }

    fn setup(
        ids: &[&str],
    ) -> (Arc<QueryCache>, Arc<MockFavoritesSource>) {
        let cache = Arc::new(QueryCache::default());
        let source = Arc::new(MockFavoritesSource::with_favorites(seeded(ids)));
        cache.set_data(QueryKey::Favorites, QueryData::Favorites(seeded(ids)));
        (cache, source)
    }

    fn cached(cache: &QueryCache) -> Option<Vec<MovieSummary>> {
        cache
            .get_data(&QueryKey::Favorites)
            .and_then(QueryData::into_favorites)
    }

    #[tokio::test]
    async fn test_add_commits_and_invalidates() {
        let (cache, source) = setup(&["a"]);
        let add = MutationCoordinator::new(AddFavorite, cache.clone(), source.clone());

        add.mutate(fixtures::movie("b")).await.unwrap();

        assert_eq!(cached(&cache), Some(seeded(&["a", "b"])));
        assert_eq!(source.favorites().await, seeded(&["a", "b"]));
        assert!(!cache.is_fresh_key(&QueryKey::Favorites));
        assert_eq!(add.state(), MutationState::Settled(Ok(())));
    }

    #[tokio::test]
    async fn test_failed_remove_rolls_back() {
        let (cache, source) = setup(&["a", "b"]);
        let remove = MutationCoordinator::new(RemoveFavorite, cache.clone(), source.clone());
        let error = SourceError::Storage(crate::favorites::PersistenceError::Unavailable(
            "storage quota exceeded".to_string(),
        ));
        source.set_next_error(error.clone()).await;

        let result = remove.mutate("a".to_string()).await;

        assert_eq!(result, Err(MutationError::Write(error.clone())));
        assert_eq!(cached(&cache), Some(seeded(&["a", "b"])));
        assert_eq!(source.favorites().await, seeded(&["a", "b"]));
        assert_eq!(
            remove.state(),
            MutationState::Settled(Err(MutationError::Write(error)))
        );
    }

    #[tokio::test]
    async fn test_rollback_of_never_fetched_favorites() {
        let cache = Arc::new(QueryCache::default());
        let source = Arc::new(MockFavoritesSource::new());
        source
            .set_next_error(SourceError::NotFound("x".to_string()))
            .await;
        let add = MutationCoordinator::new(AddFavorite, cache.clone(), source.clone());

        assert!(add.mutate(fixtures::movie("x")).await.is_err());

        assert_eq!(cached(&cache), None);
        assert!(cache
            .snapshot(&QueryKey::Favorites)
            .unwrap()
            .state
            .is_pending());
    }

    #[tokio::test]
    async fn test_optimistic_value_visible_while_writing() {
        let (cache, source) = setup(&["a", "b", "c"]);
        source.set_delay(Duration::from_millis(50)).await;
        let clear = Arc::new(MutationCoordinator::new(
            ClearFavorites,
            cache.clone(),
            source.clone(),
        ));
        let mut state = clear.subscribe();

        let task = {
            let clear = clear.clone();
            tokio::spawn(async move { clear.mutate(()).await })
        };

        state.wait_for(MutationState::is_mutating).await.unwrap();
        assert_eq!(cached(&cache), Some(Vec::new()));

        task.await.unwrap().unwrap();
        assert!(source.favorites().await.is_empty());
        assert_eq!(clear.state(), MutationState::Settled(Ok(())));
    }

    #[tokio::test]
    async fn test_mutation_cancels_in_flight_refetch() {
        let (cache, source) = setup(&["a"]);
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let refetch = {
            let cache = cache.clone();
            cache.invalidate(&QueryKey::Favorites);
            tokio::spawn(async move {
                cache
                    .fetch(QueryKey::Favorites, move || {
                        async move {
                            let _ = release_rx.await;
                            Ok::<_, crate::query::QueryError>(QueryData::Favorites(Vec::new()))
                        }
                        .boxed()
                    })
                    .await
            })
        };
        while !cache
            .snapshot(&QueryKey::Favorites)
            .map(|s| s.is_fetching)
            .unwrap_or(false)
        {
            tokio::task::yield_now().await;
        }

        let add = MutationCoordinator::new(AddFavorite, cache.clone(), source.clone());
        add.mutate(fixtures::movie("b")).await.unwrap();
        release_tx.send(()).unwrap();

        assert!(refetch.await.unwrap().is_err());
        assert_eq!(cached(&cache), Some(seeded(&["a", "b"])));
    }

    #[tokio::test]
    async fn test_rapid_toggle_leaves_movie_out() {
        let (cache, source) = setup(&[]);
        source.set_delay(Duration::from_millis(30)).await;
        let add = MutationCoordinator::new(AddFavorite, cache.clone(), source.clone());
        let remove = MutationCoordinator::new(RemoveFavorite, cache.clone(), source.clone());

        let (added, removed) = tokio::join!(
            add.mutate(fixtures::movie("m")),
            remove.mutate("m".to_string())
        );

        added.unwrap();
        removed.unwrap();
        assert!(source.favorites().await.is_empty());
        assert_eq!(cached(&cache), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_rapid_toggle_against_repository() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repository =
            FavoritesRepository::new(Arc::new(LocalFavoritesBackend::new(store)));
        let source = Arc::new(LocalFavorites::new(repository.clone()));
        let cache = Arc::new(QueryCache::default());
        let add = MutationCoordinator::new(AddFavorite, cache.clone(), source.clone());
        let remove = MutationCoordinator::new(RemoveFavorite, cache.clone(), source);

        let (added, removed) = tokio::join!(
            add.mutate(fixtures::movie("m")),
            remove.mutate("m".to_string())
        );

        assert!(added.is_ok() && removed.is_ok());
        assert!(!repository.is_favorite("m"));
    }
}
