use crate::{AuthError, Claims, Clock, Result as AuthErrorResult, lifetime::validate_lifetime};

use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Bearer-token validator: signature, issuer and audience via `jsonwebtoken`,
/// lifetime via [`validate_lifetime`] driven by an injected clock.
///
/// The library's built-in `exp`/`nbf` checks are disabled because they read
/// the wall clock directly; routing the lifetime decision through [`Clock`]
/// keeps token expiry testable with fabricated current times.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    skew: Duration,
}

impl JwtValidator {
    /// Create a validator with an HS256 symmetric secret.
    ///
    /// Issuer and audience are matched by exact string equality.
    pub fn with_hs256(
        secret: &[u8],
        issuer: &str,
        audience: &str,
        skew: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        // Lifetime is checked by validate_lifetime against the injected clock;
        // exp may be absent. iss and aud stay required so a token that simply
        // omits them cannot dodge the issuer/audience match.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.remove("exp");

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
            skew,
        }
    }

    /// Validate a JWT and return its claims.
    ///
    /// Any single failing check - signature, issuer, audience, claim shape or
    /// lifetime - yields an error; the caller treats the request as
    /// unauthenticated.
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::InvalidIssuer => AuthError::InvalidToken {
                        message: "issuer mismatch".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                    ErrorKind::InvalidAudience => AuthError::InvalidToken {
                        message: "audience mismatch".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                    ErrorKind::MissingRequiredClaim(claim) => AuthError::InvalidToken {
                        message: format!("missing required claim '{claim}'"),
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        let claims = token_data.claims;
        claims.validate()?;
        self.check_lifetime(&claims)?;

        Ok(claims)
    }

    #[track_caller]
    fn check_lifetime(&self, claims: &Claims) -> AuthErrorResult<()> {
        let now = self.clock.now();
        let not_before = claims.nbf.and_then(from_unix);
        let expires = claims.exp.and_then(from_unix);

        if validate_lifetime(now, self.skew, not_before, expires) {
            return Ok(());
        }

        // validate_lifetime rejects on exactly one of the two bounds
        let expired = expires.is_some_and(|exp| exp < now - self.skew);
        if expired {
            Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            })
        } else {
            Err(AuthError::TokenNotYetValid {
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}
