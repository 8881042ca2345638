use std::fs;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "show_map.log";

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the life of the process.
pub fn init_logging() -> Option<WorkerGuard> {
    // The console layer alone is enough when the log directory is unusable.
    let (file_writer, guard) = match fs::create_dir_all(LOG_DIR) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(writer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("show_map=info"));
    build_subscriber(filter, file_writer).init();
    guard
}

/// Console layer on stderr, plus a JSON file layer when a writer is given.
fn build_subscriber(filter: EnvFilter, file_writer: Option<NonBlocking>) -> impl Subscriber + Send + Sync {
    let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_with_and_without_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let appender = tracing_appender::rolling::never(dir.path(), LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let with_file = build_subscriber(EnvFilter::new("show_map=debug"), Some(writer));
        tracing::subscriber::with_default(with_file, || {
            tracing::info!(target: "show_map", "written to file");
        });
        drop(guard);
        let logged = fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert!(logged.contains("written to file"));

        let console_only = build_subscriber(EnvFilter::new("show_map=debug"), None);
        tracing::subscriber::with_default(console_only, || {
            tracing::info!(target: "show_map", "console only");
        });
    }
}
