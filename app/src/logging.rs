use crate::{AppError, EnvPaths, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::OffsetTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the logging system with file output to the logs directory
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the process.
pub fn init_logging(env_paths: &EnvPaths) -> Result<WorkerGuard> {
    let logs_dir = env_paths.logs_path();
    std::fs::create_dir_all(&logs_dir)?;

    // New log file daily
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("portfolio")
        .filename_suffix("log")
        .build(&logs_dir)
        .map_err(|e| AppError::Logging(e.to_string()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Local offset is unavailable once threads are running on some platforms
    let timer = OffsetTime::local_rfc_3339().unwrap_or_else(|_| {
        OffsetTime::new(
            time::UtcOffset::UTC,
            time::format_description::well_known::Rfc3339,
        )
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_timer(timer.clone())
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(fmt::layer().with_timer(timer).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing::info!("Logging system initialized");
    tracing::info!("Log files are being written to: {:?}", logs_dir);

    Ok(guard)
}

/// Log application shutdown
pub fn log_shutdown() {
    tracing::info!("=== Portfolio shutdown complete ===");
}
