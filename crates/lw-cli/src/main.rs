use std::io::stdout;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lw_cli::commands::replay::{OutputFormat, ReplayOptions};
use lw_cli::commands::{format, parse_datetime, replay, run};
use lw_cli::{Cli, Commands, Config, ReplayFormat};
use lw_core::ExportFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Log to stderr so stdout stays clean for reports and exports
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Some(Commands::Run) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(run::run(&config))?;
        }
        Some(Commands::Replay {
            script,
            format,
            search,
            started_at,
            output,
        }) => {
            let started_at = match started_at.as_deref() {
                Some(s) => parse_datetime(s)?,
                None => Utc::now(),
            };
            let format = match format {
                ReplayFormat::Text => OutputFormat::Text,
                ReplayFormat::Json => OutputFormat::Export(ExportFormat::Json),
                ReplayFormat::Csv => OutputFormat::Export(ExportFormat::Csv),
            };
            let options = ReplayOptions {
                format,
                search,
                started_at,
                output,
            };
            replay::run(&mut stdout().lock(), &script, &options)?;
        }
        Some(Commands::Format { ms }) => {
            format::run(&mut stdout().lock(), ms)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
