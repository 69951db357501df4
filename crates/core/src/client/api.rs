//! HTTP client for the movie API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::metrics::{API_REQUESTS, API_REQUEST_DURATION};
use crate::movie::{schema, MovieDetail, MovieSummary, SearchPage, SearchQuery};
use crate::source::{MovieSource, SourceError};

/// Errors from talking to the API.
///
/// A response that arrived but does not match the expected shape is an
/// [`InvalidResponse`](ApiError::InvalidResponse), never a request failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure (`status` is `None`) or a non-success response.
    #[error("{message}")]
    Request {
        message: String,
        status: Option<u16>,
    },

    #[error("Invalid response format from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => *status,
            ApiError::InvalidResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request {
            message: e.to_string(),
            status: e.status().map(|s| s.as_u16()),
        }
    }
}

/// Acknowledgement returned by favorites writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    pub success: bool,
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

/// Movie API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:8080/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the catalog.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let url = format!("{}/movies/search", self.base_url);
        debug!("API search: query='{}', page={}", query.query, query.page);

        let page: SearchPage = self
            .fetch_json("search", self.client.get(&url).query(query))
            .await?;
        for movie in &page.items {
            invalid_response(schema::validate_summary(movie))?;
        }
        Ok(page)
    }

    /// Get the full record for a movie.
    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, ApiError> {
        let url = format!("{}/movies/{}", self.base_url, urlencoding::encode(imdb_id));
        debug!("API get movie: id={}", imdb_id);

        let detail: MovieDetail = self.fetch_json("detail", self.client.get(&url)).await?;
        invalid_response(schema::validate_summary(&detail.summary))?;
        Ok(detail)
    }

    pub async fn list_favorites(&self) -> Result<Vec<MovieSummary>, ApiError> {
        let url = format!("{}/favorites", self.base_url);
        let bytes = self
            .fetch_bytes("favorites_list", self.client.get(&url))
            .await?;
        invalid_response(schema::decode_collection(&bytes))
    }

    pub async fn add_favorite(&self, imdb_id: &str) -> Result<WriteAck, ApiError> {
        let url = format!("{}/favorites", self.base_url);
        let request = self.client.post(&url).json(&json!({ "imdbID": imdb_id }));
        self.fetch_json("favorites_add", request).await
    }

    pub async fn remove_favorite(&self, imdb_id: &str) -> Result<WriteAck, ApiError> {
        let url = format!("{}/favorites/{}", self.base_url, urlencoding::encode(imdb_id));
        self.fetch_json("favorites_remove", self.client.delete(&url))
            .await
    }

    pub async fn clear_favorites(&self) -> Result<WriteAck, ApiError> {
        let url = format!("{}/favorites", self.base_url);
        self.fetch_json("favorites_clear", self.client.delete(&url))
            .await
    }

    /// Send a request and decode its JSON body into `T`.
    ///
    /// Non-success responses become [`ApiError::Request`] carrying the status
    /// and the body's `error` field when there is one.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let bytes = self.fetch_bytes(endpoint, request).await?;
        invalid_response(schema::decode(&bytes))
    }

    async fn fetch_bytes(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ApiError> {
        let start = Instant::now();
        let result = send(request).await;
        API_REQUEST_DURATION
            .with_label_values(&[endpoint])
            .observe(start.elapsed().as_secs_f64());

        let label = if result.is_ok() { "success" } else { "error" };
        API_REQUESTS.with_label_values(&[endpoint, label]).inc();
        if let Err(e) = &result {
            warn!("API request {} failed: {}", endpoint, e);
        }
        result
    }
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return Err(ApiError::Request {
            message,
            status: Some(status.as_u16()),
        });
    }

    Ok(bytes.to_vec())
}

fn invalid_response<T>(result: Result<T, schema::SchemaError>) -> Result<T, ApiError> {
    result.map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl MovieSource for ApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, SourceError> {
        Ok(ApiClient::search(self, query).await?)
    }

    async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        Ok(ApiClient::detail(self, imdb_id).await?)
    }
}
