//! Shared parsing helpers for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(second|minute|hour|day)s?\s+ago$").unwrap());

/// Pre-compiled regex for script offsets such as `1500`, `250ms`, `1.5s`, `2m`.
static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(ms|s|m|h)?$").unwrap());

/// Largest offset accepted in a script: 1000 hours.
const MAX_OFFSET_MS: f64 = 1000.0 * 3_600_000.0;

/// Parse a datetime string as either RFC 3339 or relative time.
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00Z"
/// - Relative: "90 seconds ago", "2 hours ago", "1 day ago"
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use RFC 3339 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;
    if n > 1_000_000 {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = match &caps[2] {
        "second" => Duration::seconds(n),
        "minute" => Duration::minutes(n),
        "hour" => Duration::hours(n),
        "day" => Duration::days(n),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };
    Ok(Utc::now() - duration)
}

/// Parse a script offset into milliseconds. A bare number is milliseconds.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is non-negative and bounded by MAX_OFFSET_MS"
)]
pub fn parse_offset(s: &str) -> anyhow::Result<u64> {
    let Some(caps) = OFFSET_RE.captures(s) else {
        anyhow::bail!("Invalid time offset: {s}. Use e.g. 1500, 250ms, 1.5s, 2m or 1h");
    };

    let value: f64 = caps[1]
        .parse()
        .with_context(|| format!("failed to parse number in offset {s}"))?;
    let factor = match caps.get(2).map(|m| m.as_str()) {
        None | Some("ms") => 1.0,
        Some("s") => 1_000.0,
        Some("m") => 60_000.0,
        Some("h") => 3_600_000.0,
        Some(unit) => anyhow::bail!("Unknown offset unit: {unit}"),
    };

    let ms = (value * factor).round();
    if ms > MAX_OFFSET_MS {
        anyhow::bail!("Time offset too large: {s}");
    }
    Ok(ms as u64)
}
