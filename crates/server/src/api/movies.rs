//! Movie search and detail handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use marquee_core::movie::{OrderBy, SortDirection};
use marquee_core::{CatalogError, MovieDetail, SearchPage, SearchQuery};
use serde::Deserialize;
use tracing::debug;

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

impl SearchParams {
    fn into_query(self, default_page_size: u32) -> SearchQuery {
        let mut query = SearchQuery::new(self.q.unwrap_or_default(), self.page.unwrap_or(1))
            .with_page_size(self.page_size.unwrap_or(default_page_size));
        if let Some(order_by) = self.order_by {
            query = query.ordered_by(order_by, self.direction.unwrap_or_default());
        }
        query
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/movies/search
///
/// Title search with pagination and optional ordering.
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, impl IntoResponse> {
    state.simulate_latency().await;

    let query = params.into_query(state.config().catalog.default_page_size);
    debug!("Searching movies: {:?}", query);

    match state.catalog().search(&query) {
        Ok(page) => Ok(Json(page)),
        Err(e) => Err((StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string()))),
    }
}

/// GET /api/movies/{id}
///
/// Full record for one movie.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieDetail>, impl IntoResponse> {
    state.simulate_latency().await;

    match state.catalog().get(&id) {
        Ok(movie) => Ok(Json(movie)),
        Err(CatalogError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("Movie not found: {}", id)),
        )),
        Err(e) => Err((StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string()))),
    }
}
