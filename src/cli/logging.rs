//! Logging initialization

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// Silent unless `--debug`, `--log-file` or `RUST_LOG` asks for output.
/// With `log_to_file` the log goes to a temp file whose path is returned;
/// otherwise it goes to stderr so stdout stays clean for state JSON.
pub fn init_logging(debug: bool, log_to_file: bool) -> Result<Option<PathBuf>> {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if !debug && !log_to_file && !from_env {
        return Ok(None);
    }

    let default_level = if debug || log_to_file { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if log_to_file {
        let (file, path) = tempfile::Builder::new()
            .prefix("radarr-provider-")
            .suffix(".log")
            .tempfile()
            .context("Failed to create log file")?
            .keep()
            .context("Failed to keep log file")?;

        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        return Ok(Some(path));
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(None)
}
