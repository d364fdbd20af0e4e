use chrono::{DateTime, Utc};

/// Source of the current UTC instant.
///
/// Every component that reads time takes a `Clock` so tests can fabricate
/// arbitrary "now" values without real delays.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
