
use gate_auth::{Claims, JwtValidator, SystemClock};

use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub(crate) const SECRET: &[u8] = b"unit-test-secret-key-at-least-32-bytes";
pub(crate) const ISSUER: &str = "https://auth.example.com";
pub(crate) const AUDIENCE: &str = "gatehouse-api";

pub(crate) fn test_validator() -> JwtValidator {
    JwtValidator::with_hs256(
        SECRET,
        ISSUER,
        AUDIENCE,
        chrono::Duration::zero(),
        Arc::new(SystemClock),
    )
}

/// Mint a token for `sub` expiring `expires_in_secs` from now (may be
/// negative for an already-expired token)
pub(crate) fn mint_token(sub: &str, expires_in_secs: i64) -> String {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        name: Some("tester".to_string()),
        iss: Some(ISSUER.to_string()),
        aud: Some(AUDIENCE.to_string()),
        exp: Some((now + chrono::Duration::seconds(expires_in_secs)).timestamp()),
        nbf: None,
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
