//! Offline cache layer: a client-side worker that fronts every request
//! the client makes, keeping the static shell and previous API/image
//! responses available when network access is degraded.
//!
//! The layer is three small parts wired together here:
//!
//! - [`classify::classify`] — a pure predicate chain sorting requests into
//!   {API, image, static, unhandled}
//! - [`strategy`] — one handler per class over versioned buckets
//! - [`bucket`] — the persistent key→response stores
//!
//! Lifecycle mirrors a worker runtime: [`OfflineCache::install`] precaches
//! the static shell, [`OfflineCache::activate`] deletes every bucket from
//! other versions, and [`OfflineCache::handle`] serves intercepted
//! requests from then on.

pub mod bucket;
pub mod classify;
pub mod fetch;
pub mod strategy;

pub use bucket::{CacheBucket, RequestKey, StoredResponse};
pub use classify::{RequestClass, classify};
pub use fetch::{Fetcher, HttpFetcher};
pub use strategy::{Strategy, offline_sentinel, strategy_for};

use std::sync::Arc;

use crate::config::OfflineConfig;
use crate::error::{AppError, Result};

/// Bucket holding the precached static shell.
pub const STATIC_BUCKET: &str = "static";
/// Bucket holding previous search API responses.
pub const RUNTIME_BUCKET: &str = "runtime";
/// Bucket holding relayed images.
pub const IMG_BUCKET: &str = "img";

/// The offline caching worker.
///
/// Holds the three versioned buckets and the network seam. All behaviour
/// is driven by the reified [`OfflineConfig`] — version tag, origin,
/// endpoint prefixes, static asset list — so instances are fully testable
/// in isolation.
pub struct OfflineCache {
    config: OfflineConfig,
    fetcher: Arc<dyn Fetcher>,
    static_bucket: CacheBucket,
    runtime_bucket: CacheBucket,
    img_bucket: CacheBucket,
}

impl OfflineCache {
    /// Open the worker's buckets for the configured version.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if a bucket directory cannot be created.
    pub fn open(config: OfflineConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let root = config.resolved_cache_dir();
        let static_bucket = CacheBucket::open(&root, STATIC_BUCKET, &config.version)?;
        let runtime_bucket = CacheBucket::open(&root, RUNTIME_BUCKET, &config.version)?;
        let img_bucket = CacheBucket::open(&root, IMG_BUCKET, &config.version)?;
        Ok(Self {
            config,
            fetcher,
            static_bucket,
            runtime_bucket,
            img_bucket,
        })
    }

    /// Precache the configured static shell into the static bucket.
    ///
    /// All-or-error: a shell asset that cannot be fetched fails the
    /// install, leaving any previously active version in place.
    pub async fn install(&self) -> Result<()> {
        for asset in &self.config.static_assets {
            let request = RequestKey::get(format!(
                "{}{asset}",
                self.config.origin.trim_end_matches('/')
            ));
            let response = self.fetcher.fetch(&request).await.map_err(|e| {
                AppError::Offline(format!("install failed precaching {asset}: {e}"))
            })?;
            self.static_bucket.put(&request, &response)?;
            tracing::debug!(asset, "precached static asset");
        }
        tracing::info!(
            version = %self.config.version,
            assets = self.config.static_assets.len(),
            "offline cache installed"
        );
        Ok(())
    }

    /// Delete every bucket directory not belonging to this version.
    ///
    /// Returns the deleted directory names. After activation this version
    /// owns the cache root exclusively — no unbounded growth across
    /// deployments, no stale cross-version mixing.
    pub fn activate(&self) -> Result<Vec<String>> {
        let keep: Vec<String> = [STATIC_BUCKET, RUNTIME_BUCKET, IMG_BUCKET]
            .iter()
            .map(|name| CacheBucket::dir_name(name, &self.config.version))
            .collect();
        purge(&self.config, &keep)
    }

    /// Serve one intercepted request.
    ///
    /// Classifies the request and dispatches to the bound strategy:
    ///
    /// - API → network-first over the runtime bucket; always resolves
    /// - image → cache-or-race over the image bucket; `Ok(None)` when both
    ///   cache and network miss
    /// - static → cache-first over the static bucket
    /// - unhandled → passed through to the network untouched
    ///
    /// # Errors
    ///
    /// Static requests error only when uncached and unfetchable; unhandled
    /// requests propagate their transport error.
    pub async fn handle(&self, request: &RequestKey) -> Result<Option<StoredResponse>> {
        let class = classify(request, &self.config);
        tracing::trace!(url = %request.url, ?class, "request intercepted");
        match strategy_for(class) {
            Some(Strategy::NetworkFirst) => Ok(Some(
                strategy::network_first(&self.runtime_bucket, &self.fetcher, request).await,
            )),
            Some(Strategy::CacheOrRace) => {
                Ok(strategy::cache_or_race(&self.img_bucket, &self.fetcher, request).await)
            }
            Some(Strategy::CacheFirst) => Ok(Some(
                strategy::cache_first(&self.static_bucket, &self.fetcher, request).await?,
            )),
            None => Ok(Some(self.fetcher.fetch(request).await?)),
        }
    }

    /// The active offline configuration.
    pub fn config(&self) -> &OfflineConfig {
        &self.config
    }
}

fn purge(config: &OfflineConfig, keep: &[String]) -> Result<Vec<String>> {
    bucket::purge_stale_versions(&config.resolved_cache_dir(), keep)
}
