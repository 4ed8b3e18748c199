//! Lap analytics.
//!
//! Everything here is recomputed from the full lap list on each call; there
//! is no incremental state to drift out of sync with the ledger.

use serde::Serialize;

use crate::format::{NO_DATA, format_duration, format_fractional};
use crate::ledger::LapRecord;
use crate::types::LapLabel;

/// Total split time for one distinct label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelTotal {
    pub label: LapLabel,
    pub total_ms: u64,
    /// Number of laps carrying this label.
    pub laps: usize,
}

impl LabelTotal {
    /// Share of `overall_ms` taken by this label, in `[0.0, 1.0]`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "lap totals are far below 2^52 ms"
    )]
    pub fn share_of(&self, overall_ms: u64) -> f64 {
        if overall_ms == 0 {
            return 0.0;
        }
        self.total_ms as f64 / overall_ms as f64
    }
}

/// Split statistics over a non-empty ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitStats {
    pub fastest_ms: u64,
    /// Sequence number of the first lap with the fastest split.
    pub fastest_lap: usize,
    pub slowest_ms: u64,
    /// Sequence number of the first lap with the slowest split.
    pub slowest_lap: usize,
    /// Mean split, unrounded.
    pub average_ms: f64,
    /// Sum of all splits; equals the last lap's cumulative time.
    pub total_ms: u64,
}

/// Derived analytics for a lap list.
///
/// `splits` is `None` for an empty ledger, which is the "no data" state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub splits: Option<SplitStats>,
    /// Per-label totals in first-seen label order.
    pub per_label: Vec<LabelTotal>,
}

impl AnalyticsSnapshot {
    pub const fn is_empty(&self) -> bool {
        self.splits.is_none()
    }

    pub fn fastest_split(&self) -> Option<u64> {
        self.splits.as_ref().map(|s| s.fastest_ms)
    }

    pub fn slowest_split(&self) -> Option<u64> {
        self.splits.as_ref().map(|s| s.slowest_ms)
    }

    pub fn average_split(&self) -> Option<f64> {
        self.splits.as_ref().map(|s| s.average_ms)
    }

    pub fn total(&self) -> u64 {
        self.splits.as_ref().map_or(0, |s| s.total_ms)
    }

    /// `MM:SS.cc` renderings of fastest, slowest and average, or the
    /// placeholder for each when there is no data.
    pub fn summary_strings(&self) -> [String; 3] {
        match &self.splits {
            Some(stats) => [
                format_duration(stats.fastest_ms).short(),
                format_duration(stats.slowest_ms).short(),
                format_fractional(stats.average_ms).short(),
            ],
            None => [NO_DATA.to_string(), NO_DATA.to_string(), NO_DATA.to_string()],
        }
    }
}

/// Computes analytics over `laps`.
///
/// Ties for fastest/slowest resolve to the earliest lap.
#[expect(
    clippy::cast_precision_loss,
    reason = "lap counts and totals are far below 2^52"
)]
pub fn compute_analytics(laps: &[LapRecord]) -> AnalyticsSnapshot {
    let Some(first) = laps.first() else {
        return AnalyticsSnapshot::default();
    };

    let mut stats = SplitStats {
        fastest_ms: first.split_ms,
        fastest_lap: first.sequence_number,
        slowest_ms: first.split_ms,
        slowest_lap: first.sequence_number,
        average_ms: 0.0,
        total_ms: 0,
    };
    let mut per_label: Vec<LabelTotal> = Vec::new();

    for lap in laps {
        if lap.split_ms < stats.fastest_ms {
            stats.fastest_ms = lap.split_ms;
            stats.fastest_lap = lap.sequence_number;
        }
        if lap.split_ms > stats.slowest_ms {
            stats.slowest_ms = lap.split_ms;
            stats.slowest_lap = lap.sequence_number;
        }
        stats.total_ms += lap.split_ms;

        // Linear scan keeps first-seen order; ledgers hold at most a few
        // hundred laps.
        match per_label.iter_mut().find(|entry| entry.label == lap.label) {
            Some(entry) => {
                entry.total_ms += lap.split_ms;
                entry.laps += 1;
            }
            None => per_label.push(LabelTotal {
                label: lap.label.clone(),
                total_ms: lap.split_ms,
                laps: 1,
            }),
        }
    }
    stats.average_ms = stats.total_ms as f64 / laps.len() as f64;

    AnalyticsSnapshot {
        splits: Some(stats),
        per_label,
    }
}
