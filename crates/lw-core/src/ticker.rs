//! Display-refresh scheduling.
//!
//! A running stopwatch is polled on a fixed interval so displays can update.
//! The [`Ticker`] is that schedule: the session arms it on start and disarms
//! it on stop and reset, so no tick can fire for a stopped stopwatch.

use std::time::Duration;

/// A repeating timer the session turns on and off.
pub trait Ticker {
    /// Begins firing every `interval`. Re-arming replaces the schedule.
    fn arm(&mut self, interval: Duration);

    /// Stops firing. Must be idempotent.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// A ticker that never fires on its own; for tests and replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTicker {
    interval: Option<Duration>,
    /// Number of times the ticker has been armed.
    pub arm_count: usize,
}

impl ManualTicker {
    pub const fn new() -> Self {
        Self {
            interval: None,
            arm_count: 0,
        }
    }

    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl Ticker for ManualTicker {
    fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}
