//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Query cache (hits, misses, joined fetches)
//! - Optimistic mutations (outcomes, rollbacks, duration)
//! - Favorites persistence
//! - The HTTP API client

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Query cache
// =============================================================================

/// Cache lookups by query kind and result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_cache_lookups_total", "Total query cache lookups"),
        &["kind", "result"], // result: "hit", "miss", "joined"
    )
    .unwrap()
});

// =============================================================================
// Mutations
// =============================================================================

/// Favorites mutations by kind and result.
pub static MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_mutations_total", "Total favorites mutations"),
        &["kind", "result"], // result: "success", "rolled_back"
    )
    .unwrap()
});

/// Duration of the authoritative write behind a mutation.
pub static MUTATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_mutation_duration_seconds",
            "Duration of favorites mutation writes",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Favorites persistence
// =============================================================================

/// Favorites writes by backend and outcome.
pub static FAVORITES_WRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_favorites_writes_total", "Total favorites writes"),
        &["backend", "outcome"], // outcome: "applied", "unchanged", "rejected", "failed"
    )
    .unwrap()
});

// =============================================================================
// API client
// =============================================================================

/// Client requests by endpoint and result.
pub static API_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_api_requests_total", "Total API client requests"),
        &["endpoint", "result"], // result: "success", "error"
    )
    .unwrap()
});

/// Client request duration in seconds.
pub static API_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_api_request_duration_seconds",
            "Duration of API client requests",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(MUTATIONS_TOTAL.clone()),
        Box::new(MUTATION_DURATION.clone()),
        Box::new(FAVORITES_WRITES.clone()),
        Box::new(API_REQUESTS.clone()),
        Box::new(API_REQUEST_DURATION.clone()),
    ]
}
