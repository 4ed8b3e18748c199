//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Stopwatch with labeled laps.
///
/// Tracks elapsed time, records laps with optional labels, and reports
/// fastest, slowest and average lap times with a per-label breakdown.
#[derive(Debug, Parser)]
#[command(name = "lw", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run an interactive stopwatch on the terminal.
    Run,

    /// Replay a timed command script and report the resulting laps.
    Replay {
        /// Script file with one `<time> <command> [label]` step per line.
        script: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReplayFormat::Text)]
        format: ReplayFormat,

        /// Only list laps whose label contains this text (case-insensitive).
        #[arg(short, long)]
        search: Option<String>,

        /// Wall-clock time of the script's first step (RFC 3339 or e.g. '2 hours ago').
        #[arg(long)]
        started_at: Option<String>,

        /// Write the output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a millisecond duration as HH:MM:SS.cc.
    Format {
        /// Duration in milliseconds.
        ms: u64,
    },
}

/// Output formats for `lw replay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplayFormat {
    Text,
    Json,
    Csv,
}
