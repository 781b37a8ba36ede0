//! Tracing initialisation for the PartScout binaries.
//!
//! Logs go to stderr with an env-filter override (`RUST_LOG`). An optional
//! log file adds a non-blocking appender whose worker guard must be held
//! for the life of the process.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking file writer alive; dropping it loses buffered logs.
pub struct LogGuard(#[allow(dead_code)] tracing_appender::non_blocking::WorkerGuard);

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("partscout=info"))
}

/// Initialise tracing to stderr.
pub fn init() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .init();
}

/// Initialise tracing to a log file (non-blocking), falling back to
/// stderr-only when the file cannot be opened.
pub fn init_with_file(path: &Path) -> Option<LogGuard> {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("failed to create log directory {}: {e}", parent.display());
            init();
            return None;
        }
    }
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_ansi(false)
                .with_env_filter(env_filter())
                .init();
            Some(LogGuard(guard))
        }
        Err(e) => {
            eprintln!("failed to open log file {}: {e}", path.display());
            init();
            None
        }
    }
}
