//! CLI subcommand implementations.

pub mod format;
pub mod replay;
pub mod report;
pub mod run;
mod util;

pub use util::parse_datetime;
