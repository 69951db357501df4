//! Query cache with request deduplication, cancellation and staleness.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tracing::debug;

use super::{QueryData, QueryError, QueryKey, QuerySnapshot, QueryState};
use crate::metrics::CACHE_LOOKUPS;

type SharedFetch = Shared<BoxFuture<'static, Result<QueryData, QueryError>>>;

/// Staleness settings.
#[derive(Debug, Clone, Default)]
pub struct QueryCacheConfig {
    /// How long search and detail results stay fresh.
    /// `None` keeps them fresh until explicitly invalidated.
    pub search_stale_time: Option<Duration>,
}

/// A running fetch. Only the entry's current `InFlight` may install a result.
#[derive(Clone)]
struct InFlight {
    id: u64,
    fetch: SharedFetch,
    cancelled: Arc<AtomicBool>,
}

impl InFlight {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

struct CacheEntry {
    state: QueryState,
    /// Set by `invalidate`, cleared by the next successful write.
    invalidated: bool,
    fetched_at: Option<Instant>,
    updated_at: Option<chrono::DateTime<Utc>>,
    in_flight: Option<InFlight>,
    tx: watch::Sender<QuerySnapshot>,
}

impl CacheEntry {
    fn new() -> Self {
        let (tx, _) = watch::channel(QuerySnapshot::default());
        Self {
            state: QueryState::Pending,
            invalidated: false,
            fetched_at: None,
            updated_at: None,
            in_flight: None,
            tx,
        }
    }

    fn write_data(&mut self, data: QueryData) {
        self.state = QueryState::Success(data);
        self.invalidated = false;
        self.fetched_at = Some(Instant::now());
        self.updated_at = Some(Utc::now());
    }

    /// Drop the in-flight fetch, if any, so its result is never installed.
    fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.cancel();
                true
            }
            None => false,
        }
    }
}

/// In-memory cache of query results keyed by [`QueryKey`].
///
/// There is no size bound: entries live until removed. The lock is never
/// held across an await point.
pub struct QueryCache {
    config: QueryCacheConfig,
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    next_fetch_id: AtomicU64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryCacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: QueryCacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
            next_fetch_id: AtomicU64::new(0),
        }
    }

    /// Return cached data for `key` if it is fresh, otherwise run `fetcher`.
    ///
    /// Concurrent calls for the same key while a fetch is in flight join that
    /// fetch instead of starting another. `fetcher` is invoked with the cache
    /// lock held and must only build the future, not poll it.
    ///
    /// If the fetch is cancelled before it completes, its result is dropped
    /// and every waiter gets [`QueryError::Cancelled`]. A result is installed
    /// only while its fetch is still the entry's in-flight fetch, so a late
    /// waiter never overwrites newer data.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<QueryData, QueryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<QueryData, QueryError>> + Send + 'static,
    {
        let in_flight = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);

            if self.is_fresh(&key, entry) {
                if let QueryState::Success(data) = &entry.state {
                    debug!("Query cache hit: {:?}", key);
                    CACHE_LOOKUPS.with_label_values(&[key.kind(), "hit"]).inc();
                    return Ok(data.clone());
                }
            }

            match &entry.in_flight {
                Some(in_flight) => {
                    debug!("Joining in-flight query: {:?}", key);
                    CACHE_LOOKUPS.with_label_values(&[key.kind(), "joined"]).inc();
                    in_flight.clone()
                }
                None => {
                    debug!("Query cache miss: {:?}", key);
                    CACHE_LOOKUPS.with_label_values(&[key.kind(), "miss"]).inc();
                    let in_flight = InFlight {
                        id: self.next_fetch_id.fetch_add(1, Ordering::Relaxed),
                        fetch: fetcher().boxed().shared(),
                        cancelled: Arc::new(AtomicBool::new(false)),
                    };
                    entry.in_flight = Some(in_flight.clone());
                    self.publish(&key, entry);
                    in_flight
                }
            }
        };

        let result = in_flight.fetch.clone().await;

        let mut entries = self.lock();
        if in_flight.cancelled.load(Ordering::SeqCst) {
            debug!("Discarding result of cancelled query: {:?}", key);
            return Err(QueryError::Cancelled);
        }
        let Some(entry) = entries.get_mut(&key) else {
            return Err(QueryError::Cancelled);
        };

        // The first waiter to wake up installs the result for everyone; later
        // waiters of the same fetch only return it.
        if matches!(&entry.in_flight, Some(current) if current.id == in_flight.id) {
            entry.in_flight = None;
            match &result {
                Ok(data) => entry.write_data(data.clone()),
                Err(e) => entry.state = QueryState::Error(e.clone()),
            }
            self.publish(&key, entry);
        }

        result
    }

    /// Cancel the in-flight fetch for `key`, if any.
    ///
    /// The underlying I/O keeps running; its result is ignored when it lands.
    /// Returns whether a fetch was cancelled.
    pub fn cancel(&self, key: &QueryKey) -> bool {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        if !entry.cancel_in_flight() {
            return false;
        }
        debug!("Cancelled in-flight query: {:?}", key);
        self.publish(key, entry);
        true
    }

    /// Current data for `key`, fresh or not.
    pub fn get_data(&self, key: &QueryKey) -> Option<QueryData> {
        self.lock()
            .get(key)
            .and_then(|entry| entry.state.data().cloned())
    }

    /// Install data for `key` directly, as if it had just been fetched.
    pub fn set_data(&self, key: QueryKey, data: QueryData) {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
        entry.write_data(data);
        self.publish(&key, entry);
    }

    /// Put back a value previously read with [`get_data`](Self::get_data).
    ///
    /// `None` returns the entry to `Pending`, i.e. "never fetched", and
    /// cancels any fetch still in flight for it.
    pub fn restore(&self, key: QueryKey, snapshot: Option<QueryData>) {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
        match snapshot {
            Some(data) => entry.write_data(data),
            None => {
                entry.cancel_in_flight();
                entry.state = QueryState::Pending;
                entry.invalidated = false;
                entry.fetched_at = None;
                entry.updated_at = Some(Utc::now());
            }
        }
        self.publish(&key, entry);
    }

    /// Mark `key` stale so the next read refetches.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.lock();
        if let Some(entry) = entries.get_mut(key) {
            entry.invalidated = true;
            self.publish(key, entry);
        }
    }

    /// Drop the entry for `key`. An in-flight fetch for it is treated as cancelled.
    ///
    /// Subscribers see their channel close.
    pub fn remove(&self, key: &QueryKey) -> bool {
        match self.lock().remove(key) {
            Some(mut entry) => {
                entry.cancel_in_flight();
                true
            }
            None => false,
        }
    }

    /// Observe the entry for `key`, creating it (as `Pending`) if needed.
    pub fn subscribe(&self, key: QueryKey) -> watch::Receiver<QuerySnapshot> {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
        self.publish(&key, entry);
        entry.tx.subscribe()
    }

    /// Current view of `key`, if the cache has an entry for it.
    pub fn snapshot(&self, key: &QueryKey) -> Option<QuerySnapshot> {
        let entries = self.lock();
        entries.get(key).map(|entry| self.snapshot_of(key, entry))
    }

    /// Whether the next read of `key` would be served from the cache.
    pub fn is_fresh_key(&self, key: &QueryKey) -> bool {
        let entries = self.lock();
        entries
            .get(key)
            .map(|entry| self.is_fresh(key, entry))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stale_time(&self, key: &QueryKey) -> Option<Duration> {
        match key {
            QueryKey::Favorites => Some(Duration::ZERO),
            QueryKey::Search(_) | QueryKey::Detail(_) => self.config.search_stale_time,
        }
    }

    fn is_fresh(&self, key: &QueryKey, entry: &CacheEntry) -> bool {
        if entry.invalidated || !matches!(entry.state, QueryState::Success(_)) {
            return false;
        }
        match (self.stale_time(key), entry.fetched_at) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(stale_time), Some(fetched_at)) => fetched_at.elapsed() < stale_time,
        }
    }

    fn snapshot_of(&self, key: &QueryKey, entry: &CacheEntry) -> QuerySnapshot {
        QuerySnapshot {
            state: entry.state.clone(),
            is_fetching: entry.in_flight.is_some(),
            is_stale: !self.is_fresh(key, entry),
            updated_at: entry.updated_at,
        }
    }

    fn publish(&self, key: &QueryKey, entry: &CacheEntry) {
        entry.tx.send_replace(self.snapshot_of(key, entry));
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
