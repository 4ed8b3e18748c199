//! The lap ledger: an ordered, append-only list of lap records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::types::LapLabel;

/// A single recorded lap.
///
/// Field names on the wire follow the lap export format
/// (`number`, `time`, `lapTime`, `label`, `timestamp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapRecord {
    /// 1-based position in the ledger.
    #[serde(rename = "number")]
    pub sequence_number: usize,

    /// Elapsed milliseconds when the lap was recorded.
    #[serde(rename = "time")]
    pub cumulative_ms: u64,

    /// Milliseconds since the previous lap (or since zero for the first).
    #[serde(rename = "lapTime")]
    pub split_ms: u64,

    pub label: LapLabel,

    /// Wall-clock time of recording. Export only; analytics ignore it.
    #[serde(rename = "timestamp", with = "iso_millis")]
    pub recorded_at: DateTime<Utc>,
}

/// Ordered lap records. Insertion order is sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    laps: Vec<LapRecord>,
}

impl Ledger {
    pub const fn new() -> Self {
        Self { laps: Vec::new() }
    }

    /// Appends a lap taken at `cumulative_ms`.
    ///
    /// A blank `label` becomes `"Lap N"` where N is the new sequence number.
    pub fn record(
        &mut self,
        cumulative_ms: u64,
        label: &str,
        recorded_at: DateTime<Utc>,
    ) -> &LapRecord {
        let sequence_number = self.laps.len() + 1;
        let previous = self.laps.last().map_or(0, |lap| lap.cumulative_ms);
        let label = LapLabel::new(label).unwrap_or_else(|_| LapLabel::numbered(sequence_number));

        self.laps.push(LapRecord {
            sequence_number,
            cumulative_ms,
            split_ms: cumulative_ms.saturating_sub(previous),
            label,
            recorded_at,
        });
        &self.laps[sequence_number - 1]
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn all(&self) -> &[LapRecord] {
        &self.laps
    }

    pub fn last(&self) -> Option<&LapRecord> {
        self.laps.last()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Laps whose label contains `term`, ignoring case, in ledger order.
    ///
    /// An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<&LapRecord> {
        let needle = term.to_lowercase();
        self.laps
            .iter()
            .filter(|lap| lap.label.matches(&needle))
            .collect()
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2025-01-01T00:00:01.500Z`.
pub(crate) mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(*dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Formats a timestamp the way lap exports carry it.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
