use gate_auth::{Clock, JwtValidator, RateLimiterStore};

use std::sync::Arc;

/// Shared application state for request handlers and middleware.
///
/// The rate limiter store is an explicit object owned by the serving
/// process and constructed once at startup; tests build as many independent
/// instances as they need.
#[derive(Clone)]
pub struct AppState {
    pub jwt_validator: Arc<JwtValidator>,
    pub limiter: Arc<RateLimiterStore>,
    pub clock: Arc<dyn Clock>,
}
