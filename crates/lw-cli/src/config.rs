//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use lw_core::{ExportFormat, SessionConfig};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Display refresh interval for `lw run`, in milliseconds.
    pub tick_interval_ms: u64,

    /// Directory that `lw run` exports are written to.
    pub export_dir: PathBuf,

    /// Export format used when none is given.
    pub export_format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            export_dir: PathBuf::from("."),
            export_format: ExportFormat::Json,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LW_*)
        figment = figment.merge(Env::prefixed("LW_"));

        figment.extract()
    }

    /// Session settings derived from this configuration.
    ///
    /// A zero interval is clamped to 1ms; the interval timer cannot fire
    /// with a zero period.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
        }
    }

    /// Where an export in `format` lands when no path is given.
    pub fn export_path(&self, format: ExportFormat) -> PathBuf {
        self.export_dir.join(format.file_name())
    }
}

/// Returns the platform-specific config directory for lapwatch.
///
/// On Linux: `~/.config/lapwatch`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lapwatch"))
}
