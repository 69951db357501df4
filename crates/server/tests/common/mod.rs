//! Common test utilities for E2E testing.
//!
//! This module provides a test fixture that creates an in-process server
//! with a seeded catalog and a fresh favorites backend, enabling E2E testing
//! without binding a port.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use marquee_core::{
    Config, FavoritesBackendKind, FavoritesRepository, MovieCatalog, StaticCatalog,
};
use marquee_server::state::{create_favorites_backend, AppState};

/// Re-export fixtures for test convenience
pub use marquee_core::testing::fixtures;

/// Test fixture for E2E testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_add_favorite() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/favorites", json!({ "imdbID": "tt0133093" })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
    /// Temporary directory for the local backend's database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with the in-memory favorites backend.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = Config::default();
        config.server.port = 0; // Not used for in-process testing
        config.server.simulated_latency_ms = test_config.simulated_latency_ms;
        config.favorites.backend = test_config.backend;
        if test_config.backend == FavoritesBackendKind::Local {
            config.favorites.path = Some(temp_dir.path().join("favorites.db"));
        }

        let catalog: Arc<dyn MovieCatalog> = Arc::new(StaticCatalog::seeded());
        let backend = create_favorites_backend(&config, Arc::clone(&catalog))
            .expect("Failed to create favorites backend");
        let favorites = FavoritesRepository::new(backend);

        let state = Arc::new(AppState::new(config, catalog, favorites));
        let router = marquee_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            temp_dir,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Get a raw text body (for non-JSON endpoints).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Identifiers of the stored favorites, in order.
    pub async fn favorite_ids(&self) -> Vec<String> {
        let response = self.get("/api/favorites").await;
        response
            .body
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|m| m["imdbID"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration for test fixtures.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Favorites backend to use
    pub backend: FavoritesBackendKind,
    /// Artificial latency per request
    pub simulated_latency_ms: u64,
}

impl TestConfig {
    /// Create config with the SQLite-backed local backend.
    pub fn with_local_backend() -> Self {
        Self {
            backend: FavoritesBackendKind::Local,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
