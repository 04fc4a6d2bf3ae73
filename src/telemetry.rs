use anyhow::{Context, Result};
use configuration::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber: human-readable logs on stderr, plus a
/// daily-rolling file when a log directory is configured.
///
/// `RUST_LOG` takes precedence over `logging.level`. The returned guard must be
/// held until exit so buffered file output is flushed.
pub fn init(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid logging level '{}'", settings.level))?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "agriscan.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .context("Failed to install tracing subscriber")?;
            Ok(None)
        }
    }
}
