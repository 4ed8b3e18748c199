//! Human-readable rendering of laps and lap analytics.
//!
//! Used by `lw replay` (text format) and by `lw run` when the session ends.

use std::fmt::Write;

use lw_core::{AnalyticsSnapshot, LapRecord, NO_DATA, format_duration};

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Lap table for the laps being shown, with the empty-state messages.
///
/// `total_laps` is the ledger size, which decides between "nothing recorded"
/// and "nothing matched". Each row ends with a bar of its split against
/// `slowest_ms`.
pub fn format_laps(shown: &[&LapRecord], total_laps: usize, slowest_ms: u64) -> String {
    if total_laps == 0 {
        return "No laps recorded yet\n".to_string();
    }
    if shown.is_empty() {
        return "No laps match your search\n".to_string();
    }

    let width = shown
        .iter()
        .map(|lap| lap.label.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Label".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<width$}  {:<8}  Total", "#", "Label", "Lap");
    for lap in shown {
        let _ = writeln!(
            out,
            "{:<4} {:<width$}  {}  {}  {}",
            format!("#{}", lap.sequence_number),
            lap.label.as_str(),
            format_duration(lap.split_ms).short(),
            format_duration(lap.cumulative_ms).short(),
            progress_bar(lap.split_ms, slowest_ms),
        );
    }
    out
}

/// Fastest, slowest and average split, plus the total when there is data.
pub fn format_summary(analytics: &AnalyticsSnapshot) -> String {
    let mut out = String::new();
    let Some(stats) = &analytics.splits else {
        for name in ["Fastest", "Slowest", "Average"] {
            let _ = writeln!(out, "{name}  {NO_DATA}");
        }
        return out;
    };

    let [fastest, slowest, average] = analytics.summary_strings();
    let _ = writeln!(out, "Fastest  {fastest} (#{})", stats.fastest_lap);
    let _ = writeln!(out, "Slowest  {slowest} (#{})", stats.slowest_lap);
    let _ = writeln!(out, "Average  {average}");
    let _ = writeln!(out, "Total    {}", format_duration(stats.total_ms).short());
    out
}

/// One line per distinct label: bar relative to the largest label, total,
/// share of overall time and lap count.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "share is within [0, 1]"
)]
pub fn format_breakdown(analytics: &AnalyticsSnapshot) -> String {
    let overall = analytics.total();
    let max = analytics
        .per_label
        .iter()
        .map(|entry| entry.total_ms)
        .max()
        .unwrap_or(0);
    let width = analytics
        .per_label
        .iter()
        .map(|entry| entry.label.as_str().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in &analytics.per_label {
        let percent = (entry.share_of(overall) * 100.0).round() as u64;
        let noun = if entry.laps == 1 { "lap" } else { "laps" };
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}  {percent:>3}%  {} {noun}",
            entry.label.as_str(),
            progress_bar(entry.total_ms, max),
            format_duration(entry.total_ms).short(),
            entry.laps,
        );
    }
    out
}

/// Full text report: laps, summary and (when there are laps) the per-label
/// breakdown.
pub fn format_report(
    shown: &[&LapRecord],
    total_laps: usize,
    analytics: &AnalyticsSnapshot,
    search: Option<&str>,
) -> String {
    let mut out = String::new();

    match search {
        Some(term) => {
            let _ = writeln!(out, "Laps matching \"{term}\"");
        }
        None => out.push_str("Laps\n"),
    }
    let slowest = analytics.slowest_split().unwrap_or(0);
    out.push_str(&format_laps(shown, total_laps, slowest));

    out.push_str("\nSummary\n");
    out.push_str(&format_summary(analytics));

    if !analytics.is_empty() {
        out.push_str("\nBy label\n");
        out.push_str(&format_breakdown(analytics));
    }
    out
}
