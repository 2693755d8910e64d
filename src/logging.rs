//! Tracing setup
//!
//! The terminal sessions own stdout, so log lines go to the file named by
//! `MAILBOX_LOG_FILE` when it is set and to stderr otherwise.

use crate::config::{LOG_FILE_ENV_VAR, LOG_LEVEL_ENV_VAR};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Resolve the filter directive: the environment wins, then `--verbose`.
pub fn log_filter(verbose: bool) -> String {
    #[allow(clippy::disallowed_methods)]
    let from_env = std::env::var(LOG_LEVEL_ENV_VAR)
        .ok()
        .filter(|level| !level.trim().is_empty());

    match from_env {
        Some(level) => level.to_lowercase(),
        None if verbose => "debug".to_string(),
        None => "warn".to_string(),
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_new(log_filter(verbose))
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("failed to build log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_ansi(false);

    #[allow(clippy::disallowed_methods)]
    let result = match std::env::var_os(LOG_FILE_ENV_VAR) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {path:?}"))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing already initialized");
    }

    Ok(())
}
