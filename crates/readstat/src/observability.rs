//! Logging setup.
//!
//! Human-readable events go to stderr. When a log file can be opened, every
//! event is also appended to it as one JSON object per line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "READSTAT_LOG_PATH";
const LOG_DIR_ENV: &str = "READSTAT_LOG_DIR";
const LOG_FILE_NAME: &str = "readstat.jsonl";

/// Where the JSONL log goes.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Log file, or `None` to log to stderr only.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file.
    ///
    /// Precedence: `READSTAT_LOG_PATH`, then `READSTAT_LOG_DIR`, then the
    /// configured `log_dir`, then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_file = env_path(LOG_PATH_ENV)
            .or_else(|| env_path(LOG_DIR_ENV).map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| config_log_dir.map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| default_log_dir().map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_log_dir() -> Option<PathBuf> {
    readstat_core::config::user_data_local_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level one step, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Keeps the background log writer alive. Drop it last.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// A log file that cannot be opened is skipped rather than treated as fatal.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already installed")?;

    Ok(ObservabilityGuard { _file: guard })
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).ok()?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
}
