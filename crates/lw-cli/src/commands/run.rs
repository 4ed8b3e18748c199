//! Implementation of the `lw run` command.
//!
//! An interactive stopwatch on stdin. The elapsed-time display is redrawn by
//! a tokio interval that exists only while the stopwatch is running; stopping
//! or resetting drops it.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use lw_core::export::export;
use lw_core::{Clock, ExportError, ExportFormat, Session, SystemClock, Ticker, format_duration};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Interval, MissedTickBehavior};

use super::report::{format_laps, format_report};
use crate::Config;

const HELP: &str = "\
Commands:
  s (or empty line)   start/stop
  l [label]           record a lap
  r                   reset
  e [json|csv] [path] export laps
  /term               list laps whose label contains term
  ?                   show this help
  q                   quit";

/// Ticker backed by a tokio interval.
#[derive(Debug, Default)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub const fn new() -> Self {
        Self { interval: None }
    }

    /// Resolves at the next tick, or never while disarmed.
    pub async fn wait(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Ticker for IntervalTicker {
    fn arm(&mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveCommand {
    Toggle,
    Lap(String),
    Reset,
    Export {
        format: Option<ExportFormat>,
        path: Option<PathBuf>,
    },
    Search(String),
    Help,
    /// A recognised command with unusable arguments.
    Invalid(String),
    Quit,
    Unknown(String),
}

/// Parses one input line.
pub fn parse_command(line: &str) -> LiveCommand {
    let line = line.trim();
    if let Some(term) = line.strip_prefix('/') {
        return LiveCommand::Search(term.trim().to_string());
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match word.to_ascii_lowercase().as_str() {
        "" | "s" | "start" | "stop" => LiveCommand::Toggle,
        "l" | "lap" => LiveCommand::Lap(rest.to_string()),
        "r" | "reset" => LiveCommand::Reset,
        "e" | "export" => parse_export(rest),
        "?" | "h" | "help" => LiveCommand::Help,
        "q" | "quit" | "exit" => LiveCommand::Quit,
        _ => LiveCommand::Unknown(line.to_string()),
    }
}

/// `e [json|csv] [path]`. Without a format, the argument is a path only when
/// it contains a `/` or `.`; any other word is an unknown format.
fn parse_export(args: &str) -> LiveCommand {
    let (first, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let rest = rest.trim();
    match first.parse::<ExportFormat>() {
        Ok(format) => LiveCommand::Export {
            format: Some(format),
            path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
        },
        Err(_) if args.is_empty() => LiveCommand::Export {
            format: None,
            path: None,
        },
        Err(_) if args.contains(['/', '.']) => LiveCommand::Export {
            format: None,
            path: Some(PathBuf::from(args)),
        },
        Err(err) => LiveCommand::Invalid(err.to_string()),
    }
}

/// Applies one command. Returns `false` when the session should end.
fn handle<C: Clock, W: Write>(
    session: &mut Session<C, IntervalTicker>,
    command: LiveCommand,
    out: &mut W,
    config: &Config,
) -> Result<bool> {
    match command {
        LiveCommand::Toggle => {
            session.toggle();
            let state = if session.is_running() {
                "Running"
            } else {
                "Stopped"
            };
            writeln!(out, "{state} at {}", session.elapsed_display())?;
        }
        LiveCommand::Lap(label) => match session.record_lap(&label) {
            Some(lap) => writeln!(
                out,
                "Lap #{} {}  {}  {}",
                lap.sequence_number,
                lap.label,
                format_duration(lap.split_ms).short(),
                format_duration(lap.cumulative_ms).short(),
            )?,
            None => writeln!(out, "Start the stopwatch before recording a lap")?,
        },
        LiveCommand::Reset => {
            session.reset();
            writeln!(out, "Reset")?;
        }
        LiveCommand::Export { format, path } => {
            let format = format.unwrap_or(config.export_format);
            let path = path.unwrap_or_else(|| config.export_path(format));
            match export(session.laps(), format) {
                Ok(contents) => match fs::write(&path, contents) {
                    Ok(()) => {
                        tracing::debug!(path = %path.display(), %format, "exported laps");
                        writeln!(
                            out,
                            "Exported {} laps to {}",
                            session.laps().len(),
                            path.display()
                        )?;
                    }
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "export failed");
                        writeln!(out, "Export failed: {}: {err}", path.display())?;
                    }
                },
                Err(ExportError::NoLaps) => writeln!(out, "No laps to export")?,
                Err(err) => writeln!(out, "Export failed: {err}")?,
            }
        }
        LiveCommand::Search(term) => {
            let found = session.search(&term);
            let slowest = session.analytics().slowest_split().unwrap_or(0);
            write!(out, "{}", format_laps(&found, session.laps().len(), slowest))?;
        }
        LiveCommand::Help => writeln!(out, "{HELP}")?,
        LiveCommand::Invalid(message) => writeln!(out, "{message}")?,
        LiveCommand::Quit => return Ok(false),
        LiveCommand::Unknown(text) => {
            writeln!(out, "Unknown command: {text} (type ? for help)")?;
        }
    }
    Ok(true)
}

/// Runs the interactive loop until `q` or end of input, then prints the
/// final report.
pub async fn drive<C, R, W>(
    session: &mut Session<C, IntervalTicker>,
    input: R,
    out: &mut W,
    config: &Config,
) -> Result<()>
where
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let event = tokio::select! {
            () = session.ticker_mut().wait() => None,
            line = lines.next_line() => Some(line.context("failed to read input")?),
        };

        match event {
            None => {
                if let Some(display) = session.tick() {
                    write!(out, "\r{display}")?;
                    out.flush()?;
                }
            }
            Some(None) => break,
            Some(Some(line)) => {
                if !handle(session, parse_command(&line), out, config)? {
                    break;
                }
            }
        }
    }

    session.stop();
    let all: Vec<_> = session.laps().iter().collect();
    writeln!(out)?;
    write!(
        out,
        "{}",
        format_report(&all, all.len(), session.analytics(), None)
    )?;
    Ok(())
}

/// Run the interactive stopwatch on stdin/stdout.
pub async fn run(config: &Config) -> Result<()> {
    let mut session = Session::with_config(
        SystemClock::new(),
        IntervalTicker::new(),
        config.session_config(),
    );
    tracing::debug!(session_id = %session.id(), "interactive session started");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;

    drive(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        &mut out,
        config,
    )
    .await
}
