//! Axum extractor resolving who is making the request

use crate::AppState;

use gate_auth::JwtValidator;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};

/// Trusted identity extracted from a validated bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

/// Per-request identity: the authenticated user when a valid bearer token is
/// presented, and the resolved client IP either way.
///
/// Resolution never fails - a missing or invalid token simply yields an
/// unauthenticated identity, and handlers that require authentication reject
/// it themselves.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    pub user: Option<AuthenticatedUser>,
    pub ip: String,
}

impl RequestIdentity {
    /// Resolve identity from request metadata. Pure function of its inputs;
    /// no I/O.
    pub fn resolve(
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
        validator: &JwtValidator,
    ) -> Self {
        let user = bearer_token(headers).and_then(|token| match validator.validate(token) {
            Ok(claims) => Some(AuthenticatedUser {
                user_id: claims.sub,
                username: claims.name,
                roles: claims.roles,
            }),
            Err(e) => {
                log::debug!("Bearer token rejected: {} ({})", e, e.error_code());
                None
            }
        });

        Self {
            user,
            ip: client_ip(headers, peer),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Rate-limit partition key: `User:{id}` for authenticated requests,
    /// `IP:{address}` otherwise.
    pub fn partition_key(&self) -> String {
        match &self.user {
            Some(user) => format!("User:{}", user.user_id),
            None => format!("IP:{}", self.ip),
        }
    }
}

impl FromRequestParts<AppState> for RequestIdentity {
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);
        let identity = RequestIdentity::resolve(&parts.headers, peer, &state.jwt_validator);

        async move { Ok(identity) }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get("authorization")?.to_str().ok()?;
    auth_header.strip_prefix("Bearer ")
}

/// Resolve the client address, preferring reverse-proxy headers.
///
/// Order: `X-Real-IP`, then the first (original client) entry of
/// `X-Forwarded-For`, then the transport peer address, then empty.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|v| v.to_str().ok()) {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    if let Some(forwarded) = headers.get("X-Forwarded-For").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => String::new(),
    }
}
