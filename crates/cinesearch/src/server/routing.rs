//! Axum router configuration for all endpoints

use axum::{
  middleware::from_fn_with_state,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{facets, index, logs, movies, search, status};
use crate::server::middleware::request_context_middleware;
use crate::server::AppState;

/// Create the application router over shared state
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoints
    .route("/status", get(status::status))
    .route("/health", get(status::status))
    // Search endpoints
    .route("/search", get(search::search))
    .route("/movies/{id}", get(movies::get_movie))
    // Index maintenance
    .route("/index/reload", post(index::reload))
    .route("/update_index", post(index::reload))
    .route("/stats", get(index::stats))
    // Facet listings
    .route("/genres", get(facets::genres))
    .route("/countries", get(facets::countries))
    .route("/categories", get(facets::categories))
    // Logs endpoint
    .route("/logs", get(logs::get_logs))
    .layer(from_fn_with_state(state.clone(), request_context_middleware))
    .with_state(state)
}
