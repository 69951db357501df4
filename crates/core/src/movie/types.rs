//! Movie record types.

use serde::{Deserialize, Serialize};

/// Placeholder used by the catalog for unknown descriptive values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Minimal movie record, as returned by search and stored in favorites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    /// Catalog identifier (IMDb key, e.g. "tt0468569").
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    /// Media type ("movie", "series", ...).
    #[serde(rename = "Type")]
    pub media_type: String,
    /// Poster URL or path.
    #[serde(rename = "Poster")]
    pub poster: String,
}

impl MovieSummary {
    pub fn new(
        imdb_id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        media_type: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: year.into(),
            media_type: media_type.into(),
            poster: poster.into(),
        }
    }

    /// Identity comparison used by the favorites collection.
    pub fn same_movie(&self, other: &MovieSummary) -> bool {
        self.imdb_id == other.imdb_id
    }
}

/// A single third-party rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full movie record returned by the detail provider.
///
/// Never stored in the favorites collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(rename = "Rated")]
    pub rated: String,
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Writer")]
    pub writer: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Ratings")]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    #[serde(rename = "BoxOffice")]
    pub box_office: String,
    #[serde(rename = "Production")]
    pub production: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Response")]
    pub response: String,
}

impl MovieDetail {
    /// Build a detail record with every descriptive field set to "N/A".
    pub fn from_summary(summary: MovieSummary) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            summary,
            rated: na(),
            released: na(),
            runtime: na(),
            genre: na(),
            director: na(),
            writer: na(),
            actors: na(),
            plot: na(),
            language: na(),
            country: na(),
            awards: na(),
            ratings: Vec::new(),
            metascore: na(),
            imdb_rating: na(),
            imdb_votes: na(),
            dvd: na(),
            box_office: na(),
            production: na(),
            website: na(),
            response: "True".to_string(),
        }
    }

    pub fn imdb_id(&self) -> &str {
        &self.summary.imdb_id
    }
}

/// Field a search page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderBy {
    Title,
    Year,
    #[serde(rename = "imdbID")]
    ImdbId,
    Type,
}

/// Sort direction for ordered search pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Parameters of a search request. Also the identity of a cached search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query, matched against titles. Empty matches everything.
    #[serde(rename = "q", default)]
    pub query: String,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: None,
            direction: SortDirection::Ascending,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn ordered_by(mut self, order_by: OrderBy, direction: SortDirection) -> Self {
        self.order_by = Some(order_by);
        self.direction = direction;
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<MovieSummary>,
    pub page: u32,
    /// Always at least 1, even for an empty result set.
    pub total_pages: u32,
    pub total_results: u32,
}
