//! Tracing setup for Marquee
//!
//! The console shows what the person running the CLI or server asked for. A
//! per-run file under the logs directory keeps every request, search and
//! state transition at TRACE, replacing the file of the previous run.

use std::fs::{File, create_dir_all};
use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// HTTP client and server internals held at WARN on the console.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest"];

/// Where a run logs and how much of it reaches the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub console_level: Level,
    pub logs_dir: PathBuf,
}

impl LogSettings {
    /// Console at `console_level`, full log under `./logs`.
    pub fn new(console_level: impl Into<Level>) -> Self {
        Self {
            console_level: console_level.into(),
            logs_dir: PathBuf::from("logs"),
        }
    }

    pub fn in_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = logs_dir.into();
        self
    }

    /// File that receives the complete log of this run.
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir.join("marquee-last-run.log")
    }

    /// Console directives used when `RUST_LOG` is unset.
    pub fn console_directives(&self) -> String {
        QUIET_TARGETS
            .iter()
            .fold(self.console_level.to_string().to_lowercase(), |directives, target| {
                format!("{directives},{target}=warn")
            })
    }
}

/// Installs the console and file layers as the global subscriber.
///
/// `RUST_LOG` overrides the console filter; the file always records TRACE.
///
/// # Errors
///
/// - `Box<dyn std::error::Error>` - The logs directory or file cannot be
///   created, or a global subscriber is already installed
pub fn init_tracing(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error>> {
    create_dir_all(&settings.logs_dir)?;
    let log_file = File::create(settings.log_file())?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.console_directives()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        console = %settings.console_level,
        log_file = %settings.log_file().display(),
        "Tracing initialized"
    );
    Ok(())
}

/// Console verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Searches, requests and server lifecycle
    Info,
    /// Debounced terms, stale responses and store calls
    Debug,
    /// Everything the file log records
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_levels_map_to_tracing_levels() {
        assert_eq!(Level::from(CliLogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(CliLogLevel::Info), Level::INFO);
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_console_directives_quiet_http_internals() {
        let settings = LogSettings::new(CliLogLevel::Debug);

        assert_eq!(
            settings.console_directives(),
            "debug,hyper=warn,hyper_util=warn,h2=warn,reqwest=warn"
        );
        assert_eq!(settings.log_file(), PathBuf::from("logs/marquee-last-run.log"));
    }

    #[test]
    fn test_init_tracing_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings::new(Level::WARN).in_dir(dir.path().join("logs"));

        init_tracing(&settings).unwrap();

        assert!(settings.log_file().exists());
    }
}
