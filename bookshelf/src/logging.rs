use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for the log file. Falls back to `RUST_LOG`, then `info`.
pub const LOG_FILTER_ENV: &str = "BOOKSHELF_LOG";

/// `<config dir>/bookshelf/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join("bookshelf").join("logs"))
}

/// One file per run, named after its start time.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("bookshelf-{}.log", started.format("%Y-%m-%d-%H-%M-%S"))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Route tracing output to a fresh file under `dir` (or [`default_log_dir`]).
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(dir: Option<&Path>) -> Result<(PathBuf, WorkerGuard)> {
    let logs_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir()?,
    };
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Could not create log directory {}", logs_dir.display()))?;

    let file_name = log_file_name(Local::now());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));

    tracing_subscriber::registry()
        .with(filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("A global subscriber is already installed")?;

    Ok((logs_dir.join(file_name), guard))
}
