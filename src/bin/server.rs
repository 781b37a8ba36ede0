//! PartScout service binary.
//!
//! Serves the aggregated search endpoint and image relay over the
//! built-in source registry. An optional first argument names a TOML
//! config file; otherwise the default config path is used when present.

use partscout::{AppConfig, PartServer};
use partscout_search::SourceRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // PARTSCOUT_LOG=<path> switches from stderr to a log file.
    let _log_guard = match std::env::var_os("PARTSCOUT_LOG") {
        Some(path) => partscout::logging::init_with_file(Path::new(&path)),
        None => {
            partscout::logging::init();
            None
        }
    };

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(Path::new(&path))?,
        None => {
            let path = AppConfig::default_config_path();
            if path.exists() {
                AppConfig::from_file(&path)?
            } else {
                AppConfig::default()
            }
        }
    };

    let registry = Arc::new(SourceRegistry::builtin());
    info!(sources = ?registry.names(), "source registry ready");

    let server = PartServer::start(registry, &config).await?;
    println!("partscout-server v{} on http://{}", env!("CARGO_PKG_VERSION"), server.addr());

    tokio::signal::ctrl_c().await?;
    info!("received Ctrl+C, shutting down");
    server.shutdown();
    Ok(())
}
