use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const LOG_FILE_NAME: &str = "notepad.log";

const DEFAULT_FILTER: &str = "notepad=info";

/// Install the global subscriber, writing to `notepad.log` in the data
/// directory. The terminal belongs to the editor, so nothing is logged there.
///
/// Returns the worker guard; dropping it flushes pending events. `None` when
/// the log file cannot be opened or a subscriber is already installed.
pub fn init_logging(data_dir: &Path) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(data_dir)
        .ok()?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .ok()?;

    tracing::debug!(data_dir = %data_dir.display(), "logging initialized");
    Some(guard)
}
