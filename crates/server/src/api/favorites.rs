//! Favorites API handlers.
//!
//! Writes are idempotent: adding a present movie or removing an absent one
//! still answers with success.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use marquee_core::{MovieSummary, WriteOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteWriteResponse {
    pub success: bool,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    pub cleared: usize,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn storage_error(e: impl ToString) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(e.to_string()),
    )
}

fn required_id(id: Option<&str>) -> Result<&str, HandlerError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err((
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("imdbID is required"),
        )),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/favorites
pub async fn list_favorites(State(state): State<Arc<AppState>>) -> Json<Vec<MovieSummary>> {
    state.simulate_latency().await;
    Json(state.favorites().get())
}

/// POST /api/favorites
///
/// Body: `{ "imdbID": "..." }`. The record is looked up in the catalog.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<FavoriteWriteResponse>, HandlerError> {
    state.simulate_latency().await;

    let imdb_id = required_id(body.get("imdbID").and_then(Value::as_str))?;
    let Some(movie) = state.catalog().summary(imdb_id) else {
        warn!("Refusing to favorite unknown movie {}", imdb_id);
        return Err((
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("Movie not found: {}", imdb_id)),
        ));
    };

    match state.favorites().add(movie) {
        Ok(WriteOutcome::Rejected) => Err((
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid movie object"),
        )),
        Ok(outcome) => {
            info!("Favorite {} added ({:?})", imdb_id, outcome);
            Ok(Json(FavoriteWriteResponse {
                success: true,
                imdb_id: imdb_id.to_string(),
            }))
        }
        Err(e) => Err(storage_error(e)),
    }
}

/// DELETE /api/favorites/{id}
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteWriteResponse>, HandlerError> {
    state.simulate_latency().await;

    let imdb_id = required_id(Some(id.as_str()))?;
    match state.favorites().remove(imdb_id) {
        Ok(outcome) => {
            info!("Favorite {} removed ({:?})", imdb_id, outcome);
            Ok(Json(FavoriteWriteResponse {
                success: true,
                imdb_id: imdb_id.to_string(),
            }))
        }
        Err(e) => Err(storage_error(e)),
    }
}

/// DELETE /api/favorites
pub async fn clear_favorites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, HandlerError> {
    state.simulate_latency().await;

    let cleared = state.favorites().get().len();
    match state.favorites().clear() {
        Ok(_) => {
            info!("Cleared {} favorites", cleared);
            Ok(Json(ClearResponse {
                success: true,
                cleared,
            }))
        }
        Err(e) => Err(storage_error(e)),
    }
}
