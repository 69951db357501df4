//! Types for the query cache.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::movie::{MovieDetail, MovieSummary, SearchPage, SearchQuery};
use crate::source::SourceError;

/// Logical identity of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The favorites list.
    Favorites,
    /// One page of search results.
    Search(SearchQuery),
    /// Detail record for one movie.
    Detail(String),
}

impl QueryKey {
    /// Operation name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryKey::Favorites => "favorites",
            QueryKey::Search(_) => "search",
            QueryKey::Detail(_) => "detail",
        }
    }
}

/// Cached value for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Favorites(Vec<MovieSummary>),
    Search(SearchPage),
    Detail(Box<MovieDetail>),
}

impl QueryData {
    pub fn as_favorites(&self) -> Option<&[MovieSummary]> {
        match self {
            QueryData::Favorites(movies) => Some(movies),
            _ => None,
        }
    }

    pub fn into_favorites(self) -> Option<Vec<MovieSummary>> {
        match self {
            QueryData::Favorites(movies) => Some(movies),
            _ => None,
        }
    }

    pub fn into_search(self) -> Option<SearchPage> {
        match self {
            QueryData::Search(page) => Some(page),
            _ => None,
        }
    }

    pub fn into_detail(self) -> Option<MovieDetail> {
        match self {
            QueryData::Detail(detail) => Some(*detail),
            _ => None,
        }
    }
}

/// Why a query produced no data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The fetch was cancelled; its result, if any, was discarded.
    #[error("Query was cancelled")]
    Cancelled,

    /// The fetcher returned data of a different kind than the key expects.
    #[error("Unexpected data for {0} query")]
    UnexpectedData(&'static str),
}

/// What a consumer observes for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// No data yet.
    Pending,
    Success(QueryData),
    Error(QueryError),
}

impl QueryState {
    pub fn data(&self) -> Option<&QueryData> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }
}

/// Point-in-time view of a cache entry, published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    pub state: QueryState,
    /// A fetch for this key is in flight.
    pub is_fetching: bool,
    /// The next read will refetch.
    pub is_stale: bool,
    /// When the data was last written (fetch or direct set).
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self {
            state: QueryState::Pending,
            is_fetching: false,
            is_stale: true,
            updated_at: None,
        }
    }
}
