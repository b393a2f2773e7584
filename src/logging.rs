//! Logging setup.
//!
//! The terminal UI owns stdout, so interactive runs log to a file through a
//! non-blocking writer.  Headless runs log to stderr, leaving stdout for the
//! printed gallery.  Both honour `RUST_LOG` and default to `info`.

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `path`, appending.
///
/// Keep the returned guard alive for the program lifetime; dropping it
/// flushes and stops the background writer.
pub fn init_file_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .try_init()?;

    Ok(guard)
}

pub fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter()),
        )
        .try_init()?;
    Ok(())
}
