//! Implementation of the `lw replay` command.
//!
//! Replays a timed command script against a session driven by a manual
//! clock, then prints the laps and analytics (or an export). Output depends
//! only on the script and the start timestamp.
//!
//! Script format, one step per line:
//!
//! ```text
//! # comment
//! 0      start
//! 1s     lap Warmup
//! 2.5s   lap
//! 4s     stop
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lw_core::export::export;
use lw_core::{ExportFormat, LapRecord, ManualClock, ManualTicker, Session};

use super::report::format_report;
use super::util::parse_offset;

/// A stopwatch command in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Lap(String),
    Reset,
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based line number in the script.
    pub line: usize,
    /// Milliseconds since the script began.
    pub at_ms: u64,
    pub command: Command,
}

/// Output rendering for replay results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Export(ExportFormat),
}

/// Options for `lw replay`.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub format: OutputFormat,
    pub search: Option<String>,
    pub started_at: DateTime<Utc>,
    pub output: Option<PathBuf>,
}

/// Parses a script. Offsets must not decrease.
pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut previous_ms = 0;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (offset, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        let at_ms = parse_offset(offset).with_context(|| format!("line {line}"))?;
        if at_ms < previous_ms {
            anyhow::bail!("line {line}: time {offset} is earlier than the previous step");
        }
        previous_ms = at_ms;

        let rest = rest.trim();
        let (word, argument) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let command = match word.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "stop" => Command::Stop,
            "toggle" => Command::Toggle,
            "lap" => Command::Lap(argument.trim().to_string()),
            "reset" => Command::Reset,
            "" => anyhow::bail!("line {line}: missing command after {offset}"),
            other => anyhow::bail!(
                "line {line}: unknown command '{other}' (expected start, stop, toggle, lap or reset)"
            ),
        };

        steps.push(Step {
            line,
            at_ms,
            command,
        });
    }

    Ok(steps)
}

/// Applies `steps` to a fresh session whose wall clock begins at `started_at`.
pub fn replay(steps: &[Step], started_at: DateTime<Utc>) -> Session<ManualClock, ManualTicker> {
    let clock = ManualClock::new(started_at);
    let mut session = Session::new(clock.clone(), ManualTicker::new());

    for step in steps {
        clock.set(step.at_ms);
        match &step.command {
            Command::Start => session.start(),
            Command::Stop => session.stop(),
            Command::Toggle => session.toggle(),
            Command::Lap(label) => {
                if session.record_lap(label).is_none() {
                    tracing::warn!(line = step.line, "lap ignored: stopwatch is not running");
                }
            }
            Command::Reset => session.reset(),
        }
    }

    session
}

/// Renders the replayed session in the requested format.
pub fn render(
    session: &Session<ManualClock, ManualTicker>,
    format: OutputFormat,
    search: Option<&str>,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let shown: Vec<&LapRecord> = match search {
                Some(term) => session.search(term),
                None => session.laps().iter().collect(),
            };
            Ok(format_report(
                &shown,
                session.laps().len(),
                session.analytics(),
                search,
            ))
        }
        OutputFormat::Export(export_format) => {
            let mut out = export(session.laps(), export_format)?;
            if !out.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Run the replay command.
pub fn run<W: Write>(writer: &mut W, script: &Path, options: &ReplayOptions) -> Result<()> {
    let content = fs::read_to_string(script)
        .with_context(|| format!("failed to read script: {}", script.display()))?;
    let steps = parse_script(&content)?;
    tracing::debug!(steps = steps.len(), "parsed replay script");

    let session = replay(&steps, options.started_at);
    let rendered = render(&session, options.format, options.search.as_deref())?;

    match &options.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                writer,
                "Wrote {} laps to {}",
                session.laps().len(),
                path.display()
            )?;
        }
        None => writer.write_all(rendered.as_bytes())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    const SCRIPT: &str = "
# morning intervals
0      start
1s     lap Run
2.5s   lap   run fast
3s     stop
10s    start
11.5s  lap
";

    #[test]
    fn test_parse_script() {
        let steps = parse_script(SCRIPT).unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[0],
            Step {
                line: 3,
                at_ms: 0,
                command: Command::Start
            }
        );
        assert_eq!(steps[2].command, Command::Lap("run fast".to_string()));
        assert_eq!(steps[5].command, Command::Lap(String::new()));
        assert_eq!(steps[5].at_ms, 11_500);
    }

    #[test]
    fn test_parse_script_rejects_time_going_backwards() {
        let err = parse_script("2s start\n1s stop\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: time 1s is earlier than the previous step"
        );
    }

    #[test]
    fn test_parse_script_rejects_unknown_command() {
        let err = parse_script("0 start\n1s jump\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2: unknown command 'jump'"));
    }

    #[test]
    fn test_parse_script_rejects_missing_command() {
        let err = parse_script("5s\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: missing command after 5s");
    }

    #[test]
    fn test_parse_script_reports_bad_offset_line() {
        let err = parse_script("0 start\nsoon lap\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
        assert!(format!("{err:#}").contains("Invalid time offset: soon"));
    }

    #[test]
    fn test_replay_pauses_do_not_count() {
        let steps = parse_script(SCRIPT).unwrap();
        let session = replay(&steps, epoch());

        let cumulative: Vec<u64> = session.laps().iter().map(|lap| lap.cumulative_ms).collect();
        assert_eq!(cumulative, vec![1_000, 2_500, 4_500]);
        assert_eq!(session.laps()[2].label.as_str(), "Lap 3");
        assert!(session.is_running());
    }

    #[test]
    fn test_replay_ignores_lap_while_stopped() {
        let steps = parse_script("0 start\n1s stop\n2s lap late\n").unwrap();
        let session = replay(&steps, epoch());
        assert!(session.laps().is_empty());
    }

    #[test]
    fn test_replay_reset_clears_laps() {
        let steps = parse_script("0 start\n1s lap a\n2s reset\n3s start\n4s lap b\n").unwrap();
        let session = replay(&steps, epoch());
        assert_eq!(session.laps().len(), 1);
        assert_eq!(session.laps()[0].cumulative_ms, 1_000);
        assert_eq!(session.laps()[0].sequence_number, 1);
    }

    #[test]
    fn test_render_csv() {
        let steps = parse_script(SCRIPT).unwrap();
        let session = replay(&steps, epoch());
        let csv = render(&session, OutputFormat::Export(ExportFormat::Csv), None).unwrap();
        assert_snapshot!(csv, @r#"
        Lap Number,Label,Time,Lap Time,Timestamp
        1,"Run",00:01.00,00:01.00,2025-06-01T08:00:01.000Z
        2,"run fast",00:02.50,00:01.50,2025-06-01T08:00:02.500Z
        3,"Lap 3",00:04.50,00:02.00,2025-06-01T08:00:11.500Z
        "#);
    }

    #[test]
    fn test_render_text_with_search() {
        let steps = parse_script(SCRIPT).unwrap();
        let session = replay(&steps, epoch());
        let text = render(&session, OutputFormat::Text, Some("RUN")).unwrap();
        assert!(text.contains("#1   Run"));
        assert!(text.contains("#2   run fast"));
        assert!(!text.contains("#3   Lap 3"));
        // Analytics always cover the whole ledger.
        assert!(text.contains("Total    00:04.50"));
    }

    #[test]
    fn test_render_export_without_laps_fails() {
        let session = replay(&[], epoch());
        let err = render(&session, OutputFormat::Export(ExportFormat::Json), None).unwrap_err();
        assert_eq!(err.to_string(), "no laps to export");
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp = tempfile::tempdir().unwrap();
        let script = temp.path().join("laps.txt");
        let output = temp.path().join("out.json");
        fs::write(&script, SCRIPT).unwrap();

        let options = ReplayOptions {
            format: OutputFormat::Export(ExportFormat::Json),
            search: None,
            started_at: epoch(),
            output: Some(output.clone()),
        };
        let mut stdout = Vec::new();
        run(&mut stdout, &script, &options).unwrap();

        let message = String::from_utf8(stdout).unwrap();
        assert!(message.starts_with("Wrote 3 laps to "));
        let laps: Vec<LapRecord> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(laps.len(), 3);
    }
}
