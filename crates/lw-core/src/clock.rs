//! Time sources.
//!
//! The stopwatch never reads the system clock directly. A [`Clock`] supplies
//! both a monotonic millisecond reading (for elapsed time) and a wall-clock
//! timestamp (only stamped onto lap records for export).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};

/// A source of monotonic and wall-clock time.
pub trait Clock {
    /// Milliseconds since an arbitrary origin. Must never decrease.
    fn now_ms(&self) -> u64;

    /// Current wall-clock time.
    fn wall_now(&self) -> DateTime<Utc>;
}

/// Real clock backed by [`Instant`] for elapsed time and [`Utc::now`] for
/// timestamps.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u64 milliseconds cover ~584 million years of uptime"
    )]
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn wall_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and script replay.
///
/// Clones share the same reading, so a test can keep one handle while the
/// session owns another. Wall-clock time is `epoch + now_ms`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
    epoch: DateTime<Utc>,
}

impl ManualClock {
    /// Creates a clock reading zero whose wall time starts at `epoch`.
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(0)),
            epoch,
        }
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the reading to `ms`. Readings earlier than the current one are
    /// ignored so the clock stays monotonic.
    pub fn set(&self, ms: u64) {
        self.now_ms.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn wall_now(&self) -> DateTime<Utc> {
        let ms = i64::try_from(self.now_ms()).unwrap_or(i64::MAX);
        self.epoch + Duration::milliseconds(ms)
    }
}
