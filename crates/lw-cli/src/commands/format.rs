//! Implementation of the `lw format` command.

use std::io::Write;

use anyhow::Result;
use lw_core::format_duration;

/// Prints `ms` as `HH:MM:SS.cc`.
pub fn run<W: Write>(writer: &mut W, ms: u64) -> Result<()> {
    writeln!(writer, "{}", format_duration(ms))?;
    Ok(())
}
