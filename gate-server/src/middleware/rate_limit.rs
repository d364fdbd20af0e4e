//! Global rate-limit middleware
//!
//! Classifies each request into a partition (per-user or per-IP), checks the
//! two-tier fixed-window limiter, and short-circuits with a structured 429
//! when a quota is exceeded. Exceeding a quota is an expected, recoverable
//! condition, never a fault.

use crate::AppState;
use crate::api::extractors::request_identity::RequestIdentity;

use gate_auth::Decision;

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Duration;
use serde::Serialize;

/// Body of a 429 response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRejection {
    pub error: String,
    /// Retry hint in minutes, null when unknown
    pub retry_after: Option<f64>,
    pub message: String,
}

pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let identity = RequestIdentity::resolve(request.headers(), peer, &state.jwt_validator);
    let partition_key = identity.partition_key();

    match state.limiter.admit(&partition_key, state.clock.now()) {
        Decision::Allowed => next.run(request).await,
        Decision::Rejected { retry_after } => {
            log::warn!(
                "Rate limit exceeded. Path: {}, Identifier: {}",
                request.uri().path(),
                partition_key
            );
            rejection_response(retry_after)
        }
    }
}

/// Build the structured 429 response.
///
/// Pure function of the limiter decision, free of any limiter state: the
/// body carries the retry hint in fractional minutes, the `Retry-After`
/// header carries it in whole seconds (truncated) and is omitted when the
/// hint is unknown.
pub fn rejection_response(retry_after: Option<Duration>) -> Response {
    let body = match retry_after {
        Some(retry) => {
            let minutes = retry.num_milliseconds() as f64 / 60_000.0;
            RateLimitRejection {
                error: "Too many requests".to_string(),
                message: format!("Please try again after {} minute(s)", minutes),
                retry_after: Some(minutes),
            }
        }
        None => RateLimitRejection {
            error: "Too many requests".to_string(),
            message: "Please try again later".to_string(),
            retry_after: None,
        },
    };

    log::debug!(
        "Rate limit response details. RetryAfter: {:?}, Message: {}",
        body.retry_after,
        body.message
    );

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    if let Some(retry) = retry_after {
        if let Ok(value) = retry.num_seconds().to_string().parse() {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }

    response
}
