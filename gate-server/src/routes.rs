use crate::{AppState, api, health, middleware::rate_limit};

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints.
///
/// The rate limiter runs before everything else, matching the original
/// pipeline order: throttled requests never reach authentication.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // API endpoints
        .route("/api/me", get(api::me::get_me))
        // Global rate limiting, keyed by user or IP
        .layer(from_fn_with_state(state.clone(), rate_limit::enforce))
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
