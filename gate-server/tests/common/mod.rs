#![allow(dead_code)]

//! Test infrastructure for gate-server API tests

use gate_auth::{Claims, Clock, JwtValidator, RateLimiterStore, SystemClock};
use gate_server::AppState;

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub const SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";
pub const ISSUER: &str = "https://auth.example.com";
pub const AUDIENCE: &str = "gatehouse-api";

/// Create AppState for testing; `bypass` disables the global rate limiter
/// the way development/test environment modes do
pub fn create_test_app_state(bypass: bool) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let jwt_validator = Arc::new(JwtValidator::with_hs256(
        SECRET,
        ISSUER,
        AUDIENCE,
        chrono::Duration::zero(),
        clock.clone(),
    ));

    AppState {
        jwt_validator,
        limiter: Arc::new(RateLimiterStore::new(bypass)),
        clock,
    }
}

/// Mint a signed token for `sub`, expiring `expires_in_secs` from now
/// (negative for already expired), optionally not valid before
/// `not_before_in_secs` from now
pub fn mint_token(sub: &str, expires_in_secs: i64, not_before_in_secs: Option<i64>) -> String {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        name: Some("tester".to_string()),
        iss: Some(ISSUER.to_string()),
        aud: Some(AUDIENCE.to_string()),
        exp: Some((now + chrono::Duration::seconds(expires_in_secs)).timestamp()),
        nbf: not_before_in_secs.map(|secs| (now + chrono::Duration::seconds(secs)).timestamp()),
        iat: Some(now.timestamp()),
        roles: vec!["user".to_string()],
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}
