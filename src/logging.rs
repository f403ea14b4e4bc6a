use std::env;
use std::path::Path;
use tracing::info;
use tracing::subscriber::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "fastq_manifest.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keeps the run's subscriber installed and the file writer alive. Dropping
/// it flushes the log file.
pub struct LogGuard {
    _subscriber: DefaultGuard,
    _writer: WorkerGuard,
}

pub fn init_logger(output_dir: &Path) -> anyhow::Result<LogGuard> {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(output_dir)?;
    let (non_blocking, writer_guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(false)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                .with_target(false)
                .with_ansi(false),
        )
        .with(filter_layer);

    let subscriber_guard = tracing::subscriber::set_default(subscriber);

    info!("Logging to {}", output_dir.join(LOG_FILE_NAME).display());

    Ok(LogGuard {
        _subscriber: subscriber_guard,
        _writer: writer_guard,
    })
}
