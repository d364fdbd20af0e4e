use chrono::{DateTime, Duration, Utc};
use log::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Decide whether a token's lifetime window contains `now`, with a symmetric
/// clock-skew tolerance: `skew` extends the valid-from boundary backward and
/// the valid-until boundary forward.
///
/// A missing claim is treated as "no constraint in that direction". Pure
/// function of its inputs aside from info-level diagnostics; callers supply
/// `now` explicitly so tests can fabricate current times.
pub fn validate_lifetime(
    now: DateTime<Utc>,
    skew: Duration,
    not_before: Option<DateTime<Utc>>,
    expires: Option<DateTime<Utc>>,
) -> bool {
    if let Some(nbf) = not_before {
        if nbf > now + skew {
            info!(
                "Token is not valid before {}. Current time (with skew) is {}.",
                nbf.format(TIMESTAMP_FORMAT),
                (now + skew).format(TIMESTAMP_FORMAT),
            );
            return false;
        }
    }

    if let Some(exp) = expires {
        if exp < now - skew {
            info!(
                "Token expired at {}. Current time (with skew) is {}.",
                exp.format(TIMESTAMP_FORMAT),
                (now - skew).format(TIMESTAMP_FORMAT),
            );
            return false;
        }
    }

    true
}
