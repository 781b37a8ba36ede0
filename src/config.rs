//! Configuration types for the PartScout service and offline cache layer.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP service settings.
    pub server: ServerConfig,
    /// Search aggregation settings.
    pub search: partscout_search::SearchConfig,
    /// Offline cache layer settings.
    pub offline: OfflineConfig,
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (0 = auto-assign, used by tests).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Offline cache layer configuration.
///
/// Reified as explicit data — version tag, bucket root, asset list — so
/// the caching component is testable in isolation from any runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineConfig {
    /// Build identifier versioning every bucket. Activation deletes
    /// buckets carrying any other version.
    pub version: String,
    /// Root directory for bucket storage. `None` uses the platform cache
    /// directory.
    pub cache_dir: Option<PathBuf>,
    /// Origin the client treats as same-origin for static caching.
    pub origin: String,
    /// Path prefix identifying search API requests.
    pub api_prefix: String,
    /// Path prefix identifying image relay requests.
    pub img_prefix: String,
    /// Static shell assets precached on install.
    pub static_assets: Vec<String>,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            version: format!("v{}", env!("CARGO_PKG_VERSION")),
            cache_dir: None,
            origin: "http://127.0.0.1:8080".to_string(),
            api_prefix: "/api/search".to_string(),
            img_prefix: "/api/img".to_string(),
            static_assets: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/styles.css".to_string(),
                "/app.js".to_string(),
                "/manifest.webmanifest".to_string(),
                "/img/no-image.png".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location: `<config_dir>/partscout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("partscout")
            .join("config.toml")
    }
}

impl OfflineConfig {
    /// Resolve the bucket root directory, falling back to the platform
    /// cache directory.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("partscout")
        })
    }
}
