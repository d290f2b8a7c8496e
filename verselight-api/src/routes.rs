//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes nested under `/api`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Verse lookup
        .route("/validate-verse", post(handlers::validate_verse))

        // Enrichment
        .route("/explain", post(handlers::explain))
        .route("/context", post(handlers::context))
        .route("/crossref", post(handlers::crossref))
        .route("/translate", post(handlers::translate))
        .route("/youtube", post(handlers::youtube))

        // Cache
        .route("/cache/stats", get(handlers::cache_stats));

    Router::new().nest("/api", api).with_state(state)
}
