//! File logging for the TUI. stderr belongs to the terminal UI, so events go
//! to a daily rolling file instead.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use salesdash_core::config::LoggingSettings;

pub const LOG_FILE_NAME: &str = "salesdash-tui.log";

/// Install the global subscriber. Keep the returned guard alive until exit or
/// buffered lines are lost.
///
/// `RUST_LOG` wins over the configured level. Returns `None` when a
/// subscriber is already installed (tests).
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&settings.dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .ok()
        .map(|()| guard)
}
