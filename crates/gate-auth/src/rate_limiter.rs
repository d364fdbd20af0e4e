use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// A fixed-window quota: `permit_limit` requests per `window_secs`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitWindow {
    pub window_secs: i64,
    pub permit_limit: u32,
}

impl RateLimitWindow {
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }
}

/// 100 requests per minute.
pub const MINUTE_WINDOW: RateLimitWindow = RateLimitWindow {
    window_secs: 60,
    permit_limit: 100,
};

/// 1000 requests per hour.
pub const HOUR_WINDOW: RateLimitWindow = RateLimitWindow {
    window_secs: 3_600,
    permit_limit: 1_000,
};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected { retry_after: Option<Duration> },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Counter for one partition in one window.
#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    count: u32,
    window_start: DateTime<Utc>,
}

impl FixedWindow {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            window_start: at,
        }
    }

    /// Reset if the window has lapsed, count the request, and return the
    /// retry-after duration when the quota is exceeded.
    fn admit(&mut self, window: &RateLimitWindow, at: DateTime<Utc>) -> Option<Duration> {
        if at >= self.window_start + window.duration() {
            self.window_start = at;
            self.count = 0;
        }

        self.count = self.count.saturating_add(1);
        if self.count > window.permit_limit {
            Some(self.window_start + window.duration() - at)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PartitionCounters {
    minute: FixedWindow,
    hour: FixedWindow,
}

impl PartitionCounters {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            minute: FixedWindow::new(at),
            hour: FixedWindow::new(at),
        }
    }
}

/// Two-tier fixed-window request throttle, partitioned by key.
///
/// Partitions are created lazily and tracked independently; the
/// read-check-increment-reset sequence for one key runs under that key's
/// map entry, so concurrent `admit` calls for the same key serialize while
/// distinct keys do not contend on a single lock.
///
/// Fixed-window semantics: increments on rejected requests are not undone,
/// and bursts straddling a window boundary can transiently pass twice the
/// configured rate.
pub struct RateLimiterStore {
    partitions: DashMap<String, PartitionCounters>,
    bypass: bool,
}

impl RateLimiterStore {
    /// Build a store; `bypass` (decided once at startup, true in the
    /// Development and Test environment modes) makes `admit` always allow
    /// without mutating state.
    pub fn new(bypass: bool) -> Self {
        Self {
            partitions: DashMap::new(),
            bypass,
        }
    }

    pub fn bypassed(&self) -> bool {
        self.bypass
    }

    /// Check both windows for `partition_key` at instant `at`.
    ///
    /// When both windows are exceeded the retry-after of the stricter
    /// constraint (the larger value) is returned.
    pub fn admit(&self, partition_key: &str, at: DateTime<Utc>) -> Decision {
        if self.bypass {
            return Decision::Allowed;
        }

        let mut counters = self
            .partitions
            .entry(partition_key.to_string())
            .or_insert_with(|| PartitionCounters::new(at));

        let minute = counters.minute.admit(&MINUTE_WINDOW, at);
        let hour = counters.hour.admit(&HOUR_WINDOW, at);

        match (minute, hour) {
            (None, None) => Decision::Allowed,
            (m, h) => Decision::Rejected {
                retry_after: m.max(h),
            },
        }
    }

    /// Drop partitions idle for a full hour beyond their hour window.
    ///
    /// Bounds memory growth from many distinct keys; the serving process
    /// runs this periodically in the background.
    pub fn sweep_idle(&self, at: DateTime<Utc>) {
        let idle_cutoff = HOUR_WINDOW.duration() * 2;
        self.partitions
            .retain(|_, counters| at - counters.hour.window_start < idle_cutoff);
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}
