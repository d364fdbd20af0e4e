use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CLOCK_SKEW_SECS, DEFAULT_JWT_EXPIRY_MINUTES,
    DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS, MIN_JWT_SECRET_LENGTH,
};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

/// Bearer-token validation settings.
///
/// The secret is a symmetric HS256 signing key; issuer and audience are
/// matched by exact string equality.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub expiry_in_minutes: u32,
    pub refresh_token_lifetime_in_days: u32,
    /// Clock-skew tolerance applied to lifetime checks
    pub clock_skew_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: None,
            audience: None,
            expiry_in_minutes: DEFAULT_JWT_EXPIRY_MINUTES,
            refresh_token_lifetime_in_days: DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }
}

impl AuthConfig {
    /// Fail fast at startup rather than degrade at request time
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = match &self.jwt.secret {
            Some(s) if !s.is_empty() => s,
            _ => return Err(ConfigError::auth("auth.jwt.secret is required")),
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt.secret must be at least {} characters, got {}",
                MIN_JWT_SECRET_LENGTH,
                secret.len()
            )));
        }

        if self.jwt.issuer.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::auth("auth.jwt.issuer is required"));
        }

        if self.jwt.audience.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::auth("auth.jwt.audience is required"));
        }

        if self.jwt.expiry_in_minutes == 0 {
            return Err(ConfigError::auth(
                "auth.jwt.expiry_in_minutes must be at least 1",
            ));
        }

        Ok(())
    }
}
