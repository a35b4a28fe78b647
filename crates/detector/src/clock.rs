//! Time sources for the detector.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of "now" for statistics and detection timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Externally driven clock, used for replays and tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start at an epoch-millisecond timestamp, or the Unix epoch if out of range.
    pub fn from_millis(ts_ms: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(ts_ms).unwrap_or_default())
    }

    /// Move to `ts_ms` if it is later than the current time.
    ///
    /// Keeps the clock monotonic when replayed timestamps arrive out of order.
    pub fn advance_to_millis(&self, ts_ms: i64) {
        if let Some(ts) = DateTime::from_timestamp_millis(ts_ms) {
            let mut now = self.now.lock();
            if ts > *now {
                *now = ts;
            }
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
