//! Core timekeeping and lap analytics for the stopwatch.
//!
//! This crate contains:
//! - Sampling: a monotonic elapsed time derived from an injectable clock
//! - The lap ledger: ordered, immutable lap records with split times
//! - Analytics: fastest/slowest/average splits and per-label totals
//! - Formatting and export of laps as JSON or CSV

mod analytics;
pub mod clock;
pub mod export;
mod format;
mod ledger;
mod sampler;
mod stopwatch;
pub mod ticker;
pub mod types;

pub use analytics::{AnalyticsSnapshot, LabelTotal, SplitStats, compute_analytics};
pub use clock::{Clock, ManualClock, SystemClock};
pub use export::{ExportError, ExportFormat};
pub use format::{DisplayTime, NO_DATA, format_duration, format_fractional};
pub use ledger::{LapRecord, Ledger, format_timestamp};
pub use sampler::Sampler;
pub use stopwatch::{Session, SessionConfig};
pub use ticker::{ManualTicker, Ticker};
pub use types::{LapLabel, ValidationError};
