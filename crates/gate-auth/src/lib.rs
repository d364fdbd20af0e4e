pub mod claims;
pub mod clock;
pub mod error;
pub mod jwt_validator;
pub mod lifetime;
pub mod rate_limiter;

pub use claims::Claims;
pub use clock::{Clock, SystemClock};
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use lifetime::validate_lifetime;
pub use rate_limiter::{Decision, RateLimitWindow, RateLimiterStore};

#[cfg(test)]
mod tests;
