use axum::{
    middleware::from_fn,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{favorites, handlers, middleware::metrics_middleware, movies};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Movies
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        // Favorites
        .route(
            "/favorites",
            get(favorites::list_favorites)
                .post(favorites::add_favorite)
                .delete(favorites::clear_favorites),
        )
        .route("/favorites/{id}", delete(favorites::remove_favorite))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
