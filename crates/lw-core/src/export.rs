//! Lap export as JSON or CSV.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::format_duration;
use crate::ledger::{LapRecord, format_timestamp};
use crate::types::ValidationError;

/// CSV header row.
pub const CSV_HEADER: &str = "Lap Number,Label,Time,Lap Time,Timestamp";

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no laps to export")]
    NoLaps,

    #[error("failed to serialize laps: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Default file name for an export in this format.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Json => "stopwatch-laps.json",
            Self::Csv => "stopwatch-laps.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ValidationError::InvalidExportFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Renders `laps` in `format`. Fails with [`ExportError::NoLaps`] when empty.
pub fn export(laps: &[LapRecord], format: ExportFormat) -> Result<String, ExportError> {
    if laps.is_empty() {
        return Err(ExportError::NoLaps);
    }
    match format {
        ExportFormat::Json => to_json(laps),
        ExportFormat::Csv => Ok(to_csv(laps)),
    }
}

/// Pretty-printed JSON array of lap objects.
pub fn to_json(laps: &[LapRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(laps)?)
}

/// CSV with [`CSV_HEADER`] and one row per lap.
pub fn to_csv(laps: &[LapRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for lap in laps {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            lap.sequence_number,
            quote(lap.label.as_str()),
            format_duration(lap.cumulative_ms).short(),
            format_duration(lap.split_ms).short(),
            format_timestamp(lap.recorded_at),
        );
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
