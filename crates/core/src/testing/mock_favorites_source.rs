//! Mock favorites source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::movie::MovieSummary;
use crate::source::{FavoritesSource, SourceError};

/// A write received by the mock, for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Add(String),
    Remove(String),
    Clear,
}

/// Mock implementation of [`FavoritesSource`].
///
/// Writes take effect as soon as they are received; the configured delay is
/// spent afterwards, before the call returns. Overlapping writes therefore land
/// in the order they were issued.
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockFavoritesSource};
///
/// let source = MockFavoritesSource::with_favorites(vec![fixtures::movie("tt1")]);
/// source.set_next_error(SourceError::NotFound("tt2".into())).await;
/// assert!(source.add(&fixtures::movie("tt2")).await.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFavoritesSource {
    favorites: Arc<RwLock<Vec<MovieSummary>>>,
    writes: Arc<RwLock<Vec<RecordedWrite>>>,
    list_count: Arc<RwLock<usize>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockFavoritesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(favorites: Vec<MovieSummary>) -> Self {
        Self {
            favorites: Arc::new(RwLock::new(favorites)),
            ..Self::default()
        }
    }

    /// Current stored collection.
    pub async fn favorites(&self) -> Vec<MovieSummary> {
        self.favorites.read().await.clone()
    }

    pub async fn set_favorites(&self, favorites: Vec<MovieSummary>) {
        *self.favorites.write().await = favorites;
    }

    pub async fn recorded_writes(&self) -> Vec<RecordedWrite> {
        self.writes.read().await.clone()
    }

    pub async fn list_count(&self) -> usize {
        *self.list_count.read().await
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Latency added to every call.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    async fn take_error(&self) -> Option<SourceError> {
        self.next_error.write().await.take()
    }

    async fn settle(&self, result: Result<(), SourceError>) -> Result<(), SourceError> {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn write<F>(&self, record: RecordedWrite, apply: F) -> Result<(), SourceError>
    where
        F: FnOnce(&mut Vec<MovieSummary>) + Send,
    {
        if let Some(err) = self.take_error().await {
            return self.settle(Err(err)).await;
        }
        self.writes.write().await.push(record);
        apply(&mut *self.favorites.write().await);
        self.settle(Ok(())).await
    }
}

#[async_trait]
impl FavoritesSource for MockFavoritesSource {
    async fn list(&self) -> Result<Vec<MovieSummary>, SourceError> {
        *self.list_count.write().await += 1;
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        let favorites = self.favorites().await;
        self.settle(Ok(())).await?;
        Ok(favorites)
    }

    async fn add(&self, movie: &MovieSummary) -> Result<(), SourceError> {
        let movie = movie.clone();
        self.write(RecordedWrite::Add(movie.imdb_id.clone()), move |favorites| {
            if !favorites.iter().any(|m| m.same_movie(&movie)) {
                favorites.push(movie);
            }
        })
        .await
    }

    async fn remove(&self, imdb_id: &str) -> Result<(), SourceError> {
        let id = imdb_id.to_string();
        self.write(RecordedWrite::Remove(id.clone()), move |favorites| {
            favorites.retain(|m| m.imdb_id != id)
        })
        .await
    }

    async fn clear(&self) -> Result<(), SourceError> {
        self.write(RecordedWrite::Clear, |favorites| favorites.clear())
            .await
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
