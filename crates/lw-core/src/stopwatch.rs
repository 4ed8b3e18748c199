//! A stopwatch session: sampler, lap ledger and analytics behind one owner.
//!
//! All mutation goes through [`Session`] methods, and each method leaves the
//! session consistent before returning. Laps and the analytics derived from
//! them are always updated together.

use std::time::Duration;

use uuid::Uuid;

use crate::analytics::{AnalyticsSnapshot, compute_analytics};
use crate::clock::Clock;
use crate::format::{DisplayTime, format_duration};
use crate::ledger::{LapRecord, Ledger};
use crate::sampler::Sampler;
use crate::ticker::Ticker;

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How often the display is refreshed while running.
    /// Default: 10ms (centisecond resolution).
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
        }
    }
}

/// One independent stopwatch.
#[derive(Debug)]
pub struct Session<C, T> {
    id: Uuid,
    config: SessionConfig,
    clock: C,
    ticker: T,
    sampler: Sampler,
    ledger: Ledger,
    analytics: AnalyticsSnapshot,
}

impl<C: Clock, T: Ticker> Session<C, T> {
    pub fn new(clock: C, ticker: T) -> Self {
        Self::with_config(clock, ticker, SessionConfig::default())
    }

    pub fn with_config(clock: C, ticker: T, config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            clock,
            ticker,
            sampler: Sampler::new(),
            ledger: Ledger::new(),
            analytics: AnalyticsSnapshot::default(),
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub const fn is_running(&self) -> bool {
        self.sampler.is_running()
    }

    /// Starts or resumes. No-op while running.
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        if !self.sampler.start(now) {
            return;
        }
        self.ticker.arm(self.config.tick_interval);
        tracing::debug!(
            session_id = %self.id,
            elapsed_ms = self.sampler.sample(now),
            "stopwatch started"
        );
    }

    /// Stops and freezes elapsed time. No-op while stopped.
    pub fn stop(&mut self) {
        let now = self.clock.now_ms();
        if !self.sampler.stop(now) {
            return;
        }
        self.ticker.disarm();
        tracing::debug!(
            session_id = %self.id,
            elapsed_ms = self.sampler.sample(now),
            "stopwatch stopped"
        );
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Records a lap at the current elapsed time.
    ///
    /// Returns `None` and records nothing while stopped. A blank label is
    /// replaced with `"Lap N"`.
    pub fn record_lap(&mut self, label: &str) -> Option<&LapRecord> {
        if !self.is_running() {
            tracing::debug!(session_id = %self.id, "ignoring lap while stopped");
            return None;
        }

        let cumulative_ms = self.sampler.sample(self.clock.now_ms());
        let recorded_at = self.clock.wall_now();
        let sequence = self
            .ledger
            .record(cumulative_ms, label, recorded_at)
            .sequence_number;
        self.analytics = compute_analytics(self.ledger.all());

        tracing::debug!(session_id = %self.id, sequence, cumulative_ms, "lap recorded");
        self.ledger.last()
    }

    /// Stops, zeroes elapsed time and clears all laps.
    pub fn reset(&mut self) {
        self.stop();
        self.ticker.disarm();
        self.sampler.reset();
        self.ledger.clear();
        self.analytics = compute_analytics(self.ledger.all());
        tracing::debug!(session_id = %self.id, "stopwatch reset");
    }

    /// Display refresh for one tick. `None` when the ticker is disarmed.
    pub fn tick(&self) -> Option<DisplayTime> {
        self.ticker.is_armed().then(|| self.elapsed_display())
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.sampler.sample(self.clock.now_ms())
    }

    pub fn elapsed_display(&self) -> DisplayTime {
        format_duration(self.elapsed_ms())
    }

    pub fn laps(&self) -> &[LapRecord] {
        self.ledger.all()
    }

    /// Laps whose label contains `term`, case-insensitively.
    pub fn search(&self, term: &str) -> Vec<&LapRecord> {
        self.ledger.filter(term)
    }

    pub const fn analytics(&self) -> &AnalyticsSnapshot {
        &self.analytics
    }

    pub const fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Mutable access for drivers that wait on the ticker.
    pub const fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ticker::ManualTicker;

    fn session() -> (Session<ManualClock, ManualTicker>, ManualClock) {
        let clock = ManualClock::default();
        (Session::new(clock.clone(), ManualTicker::new()), clock)
    }

    #[test]
    fn test_elapsed_follows_clock_only_while_running() {
        let (mut sw, clock) = session();
        clock.advance(500);
        assert_eq!(sw.elapsed_ms(), 0);

        sw.start();
        clock.advance(1_200);
        assert_eq!(sw.elapsed_ms(), 1_200);

        sw.stop();
        clock.advance(10_000);
        assert_eq!(sw.elapsed_ms(), 1_200);

        sw.start();
        clock.advance(300);
        assert_eq!(sw.elapsed_ms(), 1_500);
    }

    #[test]
    fn test_toggle_flips_running_state() {
        let (mut sw, clock) = session();
        sw.toggle();
        assert!(sw.is_running());
        clock.advance(250);
        sw.toggle();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 250);
    }

    #[test]
    fn test_ticker_is_armed_only_while_running() {
        let (mut sw, clock) = session();
        assert!(sw.tick().is_none());

        sw.start();
        assert!(sw.ticker().is_armed());
        assert_eq!(sw.ticker().interval(), Some(Duration::from_millis(10)));
        clock.advance(1_230);
        assert_eq!(sw.tick().unwrap().to_string(), "00:00:01.23");

        sw.stop();
        assert!(!sw.ticker().is_armed());
        assert!(sw.tick().is_none());

        sw.start();
        sw.reset();
        assert!(!sw.ticker().is_armed());
        assert_eq!(sw.ticker().arm_count, 2);
    }

    #[test]
    fn test_repeated_start_does_not_rearm() {
        let (mut sw, _clock) = session();
        sw.start();
        sw.start();
        assert_eq!(sw.ticker().arm_count, 1);
    }

    #[test]
    fn test_custom_tick_interval_is_used() {
        let config = SessionConfig {
            tick_interval: Duration::from_millis(50),
        };
        let mut sw = Session::with_config(ManualClock::default(), ManualTicker::new(), config);
        sw.start();
        assert_eq!(sw.ticker().interval(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_laps_record_cumulative_and_split_times() {
        let (mut sw, clock) = session();
        sw.start();
        for step in [1_000, 1_500, 1_500] {
            clock.advance(step);
            sw.record_lap("");
        }

        let cumulative: Vec<u64> = sw.laps().iter().map(|lap| lap.cumulative_ms).collect();
        let splits: Vec<u64> = sw.laps().iter().map(|lap| lap.split_ms).collect();
        assert_eq!(cumulative, vec![1_000, 2_500, 4_000]);
        assert_eq!(splits, vec![1_000, 1_500, 1_500]);

        let analytics = sw.analytics();
        assert_eq!(analytics.fastest_split(), Some(1_000));
        assert_eq!(analytics.slowest_split(), Some(1_500));
        assert!((analytics.average_split().unwrap() - 1_333.33).abs() < 0.01);
    }

    #[test]
    fn test_lap_while_stopped_is_ignored() {
        let (mut sw, clock) = session();
        assert!(sw.record_lap("early").is_none());

        sw.start();
        clock.advance(100);
        sw.stop();
        assert!(sw.record_lap("paused").is_none());
        assert!(sw.laps().is_empty());
        assert!(sw.analytics().is_empty());
    }

    #[test]
    fn test_laps_span_pauses() {
        let (mut sw, clock) = session();
        sw.start();
        clock.advance(1_000);
        sw.record_lap("a");
        sw.stop();
        clock.advance(60_000);
        sw.start();
        clock.advance(500);
        let lap = sw.record_lap("b").unwrap();
        assert_eq!(lap.cumulative_ms, 1_500);
        assert_eq!(lap.split_ms, 500);
    }

    #[test]
    fn test_blank_label_is_numbered() {
        let (mut sw, clock) = session();
        sw.start();
        clock.advance(10);
        sw.record_lap("one");
        clock.advance(10);
        sw.record_lap("two");
        clock.advance(10);
        let lap = sw.record_lap("  ").unwrap();
        assert_eq!(lap.label.as_str(), "Lap 3");
        assert_eq!(lap.sequence_number, 3);
    }

    #[test]
    fn test_lap_timestamp_comes_from_wall_clock() {
        let (mut sw, clock) = session();
        sw.start();
        clock.advance(2_000);
        let lap = sw.record_lap("x").unwrap();
        assert_eq!(
            crate::ledger::format_timestamp(lap.recorded_at),
            "1970-01-01T00:00:02.000Z"
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut sw, clock) = session();
        sw.start();
        clock.advance(700);
        sw.record_lap("x");
        clock.advance(300);
        sw.reset();

        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(sw.laps().is_empty());
        assert!(sw.analytics().is_empty());

        clock.advance(5_000);
        assert_eq!(sw.elapsed_ms(), 0);
    }

    #[test]
    fn test_search_filters_without_mutating() {
        let (mut sw, clock) = session();
        sw.start();
        for label in ["Run", "run fast", "Jump"] {
            clock.advance(100);
            sw.record_lap(label);
        }
        let found: Vec<&str> = sw
            .search("RUN")
            .into_iter()
            .map(|lap| lap.label.as_str())
            .collect();
        assert_eq!(found, vec!["Run", "run fast"]);
        assert_eq!(sw.laps().len(), 3);
    }

    #[test]
    fn test_sessions_are_independent() {
        let clock = ManualClock::default();
        let mut a = Session::new(clock.clone(), ManualTicker::new());
        let mut b = Session::new(clock.clone(), ManualTicker::new());
        assert_ne!(a.id(), b.id());

        a.start();
        clock.advance(100);
        a.record_lap("a");
        b.start();
        clock.advance(100);

        assert_eq!(a.elapsed_ms(), 200);
        assert_eq!(b.elapsed_ms(), 100);
        assert!(b.laps().is_empty());
    }
}
