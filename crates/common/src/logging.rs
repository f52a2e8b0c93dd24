//! Tracing subscriber setup for the report driver: console (plain or JSON)
//! plus an optional mirrored log file for CI archival.

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber from `config`. Falls back to
/// `config.level` only when `RUST_LOG` is unset, so a CI job can always
/// override verbosity without touching the persisted config file.
///
/// When `config.file` is set, events are written to that file instead of
/// stdout; a failure to open it is reported to stderr and logging falls
/// back to stdout, since a report run should never fail over logging.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file = config.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("qa-report: could not open log file {path:?}: {e}"))
            .ok()
    });

    let builder = fmt::Subscriber::builder().with_env_filter(env_filter);

    let subscriber_set = match file {
        Some(file) => {
            let writer = move || file.try_clone().expect("log file handle is clonable");
            if config.json {
                tracing::subscriber::set_global_default(builder.json().with_writer(writer).finish())
            } else {
                tracing::subscriber::set_global_default(
                    builder
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_writer(writer)
                        .finish(),
                )
            }
        }
        None => {
            if config.json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(
                    builder
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .finish(),
                )
            }
        }
    };
    subscriber_set.ok();
}

/// Initializes logging with defaults; used by tests and one-off scripts that
/// don't go through [`crate::AppConfig::load`].
pub fn init_test_logging() {
    init_logging(&LoggingConfig::default());
}
