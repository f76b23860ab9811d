//! HTTP API server for healthstat.
//!
//! A thin adapter: each read endpoint maps one-to-one onto the query or
//! stats service. Loading is not exposed here.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::http::Method;
use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use healthstat_service::{QueryService, StatsService};

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for sharing across handlers; holds no per-request state.
pub struct AppState {
    /// Service for filtered observation lookups
    pub query_service: Arc<QueryService>,
    /// Service for (disease, indicator) statistics
    pub stats_service: Arc<StatsService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/observations", get(handlers::observations::list_observations))
        .route("/stats", get(handlers::stats::get_stats))
        .route("/stats/by-year", get(handlers::stats::get_stats_by_year))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod tests;
