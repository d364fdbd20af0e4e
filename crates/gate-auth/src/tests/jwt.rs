use crate::tests::{ManualClock, fixed_instant};
use crate::{AuthError, Claims, JwtValidator};

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
const ISSUER: &str = "https://auth.example.com";
const AUDIENCE: &str = "gatehouse-api";

fn create_test_token(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn valid_claims() -> Claims {
    let now = fixed_instant();
    Claims {
        sub: "user-123".to_string(),
        name: Some("alex".to_string()),
        iss: Some(ISSUER.to_string()),
        aud: Some(AUDIENCE.to_string()),
        exp: Some((now + Duration::hours(1)).timestamp()),
        nbf: None,
        iat: Some(now.timestamp()),
        roles: vec!["user".to_string()],
    }
}

fn validator_with_skew(skew: Duration) -> (JwtValidator, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(fixed_instant()));
    let validator = JwtValidator::with_hs256(SECRET, ISSUER, AUDIENCE, skew, clock.clone());
    (validator, clock)
}

#[test]
fn given_valid_token_when_validated_then_returns_claims() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let token = create_test_token(&valid_claims(), SECRET);

    let result = validator.validate(&token);

    assert!(result.is_ok());
    let validated = result.unwrap();
    assert_eq!(validated.sub, "user-123");
    assert_eq!(validated.roles, vec!["user".to_string()]);
}

#[test]
fn given_expired_token_when_validated_then_returns_token_expired_error() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.exp = Some((fixed_instant() - Duration::hours(1)).timestamp());
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_token_expired_one_minute_ago_when_skew_is_two_minutes_then_valid() {
    let (validator, _clock) = validator_with_skew(Duration::minutes(2));
    let mut claims = valid_claims();
    claims.exp = Some((fixed_instant() - Duration::minutes(1)).timestamp());
    let token = create_test_token(&claims, SECRET);

    assert!(validator.validate(&token).is_ok());
}

#[test]
fn given_not_yet_valid_token_when_validated_then_returns_not_yet_valid_error() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.nbf = Some((fixed_instant() + Duration::minutes(10)).timestamp());
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::TokenNotYetValid { .. })));
}

#[test]
fn given_token_without_lifetime_claims_when_validated_then_ok() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.exp = None;
    claims.nbf = None;
    let token = create_test_token(&claims, SECRET);

    assert!(validator.validate(&token).is_ok());
}

#[test]
fn given_clock_advanced_past_expiry_when_revalidated_then_expired() {
    let (validator, clock) = validator_with_skew(Duration::zero());
    let token = create_test_token(&valid_claims(), SECRET);

    assert!(validator.validate(&token).is_ok());

    clock.advance(Duration::hours(2));
    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_wrong_secret_when_validated_then_returns_decode_error() {
    let wrong_secret = b"wrong-secret-key-at-least-32-byt";
    let clock = Arc::new(ManualClock::new(fixed_instant()));
    let validator =
        JwtValidator::with_hs256(wrong_secret, ISSUER, AUDIENCE, Duration::zero(), clock);
    let token = create_test_token(&valid_claims(), SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_wrong_issuer_when_validated_then_returns_invalid_token() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.iss = Some("https://rogue.example.com".to_string());
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(result.is_err());
}

#[test]
fn given_wrong_audience_when_validated_then_returns_invalid_token() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.aud = Some("some-other-api".to_string());
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(result.is_err());
}

#[test]
fn given_token_omitting_issuer_and_audience_when_validated_then_rejected() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.iss = None;
    claims.aud = None;
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_token_omitting_audience_only_when_validated_then_rejected() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.aud = None;
    let token = create_test_token(&claims, SECRET);

    assert!(validator.validate(&token).is_err());
}

#[test]
fn given_empty_subject_when_validated_then_returns_invalid_claim() {
    let (validator, _clock) = validator_with_skew(Duration::zero());
    let mut claims = valid_claims();
    claims.sub = String::new();
    let token = create_test_token(&claims, SECRET);

    let result = validator.validate(&token);

    assert!(matches!(result, Err(AuthError::InvalidClaim { .. })));
}
