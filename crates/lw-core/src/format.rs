//! Duration formatting for display and export.

use std::fmt;

use serde::Serialize;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;
const MS_PER_HUNDREDTH: u64 = 10;

/// Placeholder shown for analytics when there are no laps.
pub const NO_DATA: &str = "--:--.--";

/// A duration split into zero-padded display components.
///
/// Each component is the floor remainder after removing the larger units.
/// Hours are padded to two digits but are not capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub hundredths: String,
}

impl DisplayTime {
    /// `MM:SS.cc`, the form used for lap times and exports.
    pub fn short(&self) -> String {
        format!("{}:{}.{}", self.minutes, self.seconds, self.hundredths)
    }
}

impl fmt::Display for DisplayTime {
    /// `HH:MM:SS.cc`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}.{}",
            self.hours, self.minutes, self.seconds, self.hundredths
        )
    }
}

/// Splits `ms` into hours, minutes, seconds and hundredths.
pub fn format_duration(ms: u64) -> DisplayTime {
    DisplayTime {
        hours: format!("{:02}", ms / MS_PER_HOUR),
        minutes: format!("{:02}", ms % MS_PER_HOUR / MS_PER_MINUTE),
        seconds: format!("{:02}", ms % MS_PER_MINUTE / MS_PER_SECOND),
        hundredths: format!("{:02}", ms % MS_PER_SECOND / MS_PER_HUNDREDTH),
    }
}

/// Formats a fractional millisecond value (an average) by flooring it first.
///
/// Negative and non-finite values are out of contract and render as zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is floored and checked non-negative before the cast"
)]
pub fn format_fractional(ms: f64) -> DisplayTime {
    if !ms.is_finite() || ms < 0.0 {
        return format_duration(0);
    }
    format_duration(ms.floor() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_into_components() {
        let time = format_duration(3_661_250);
        assert_eq!(time.hours, "01");
        assert_eq!(time.minutes, "01");
        assert_eq!(time.seconds, "01");
        assert_eq!(time.hundredths, "25");
    }

    #[test]
    fn test_zero_is_all_zeros() {
        assert_eq!(format_duration(0).to_string(), "00:00:00.00");
    }

    #[test]
    fn test_hundredths_are_floored() {
        assert_eq!(format_duration(1_999).to_string(), "00:00:01.99");
        assert_eq!(format_duration(9).to_string(), "00:00:00.00");
    }

    #[test]
    fn test_hours_are_not_capped() {
        assert_eq!(format_duration(100 * MS_PER_HOUR).hours, "100");
    }

    #[test]
    fn test_short_form_drops_hours() {
        assert_eq!(format_duration(3_661_250).short(), "01:01.25");
        assert_eq!(format_duration(1_500).short(), "00:01.50");
    }

    #[test]
    fn test_fractional_values_are_floored() {
        assert_eq!(format_fractional(4_000.0 / 3.0).short(), "00:01.33");
        assert_eq!(format_fractional(19.999).short(), "00:00.01");
    }

    #[test]
    fn test_fractional_out_of_contract_renders_zero() {
        assert_eq!(format_fractional(-5.0).short(), "00:00.00");
        assert_eq!(format_fractional(f64::NAN).short(), "00:00.00");
    }
}
