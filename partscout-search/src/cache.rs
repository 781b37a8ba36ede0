//! In-memory cache for aggregated search results.
//!
//! Caches the final merged item list keyed by the (lowercased query,
//! sorted active-source set) pair. Uses [`moka`] for async-friendly
//! caching with configurable TTL and automatic eviction. Disabled when
//! the configured TTL is 0.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use std::time::Duration;

use moka::future::Cache;

use crate::types::PartItem;

/// Maximum number of cached result sets.
const MAX_CACHE_ENTRIES: u64 = 100;

/// Global process-wide result cache.
///
/// Lazily initialised on first access. TTL is set when first created
/// and cannot be changed after initialisation.
static CACHE: OnceLock<Cache<CacheKey, Vec<PartItem>>> = OnceLock::new();

/// Composite cache key: normalised query + active-source-set hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed query string.
    query: String,
    /// Hash of the sorted active source names, so different source
    /// selections produce different cache entries.
    source_hash: u64,
}

impl CacheKey {
    /// Build a deterministic cache key from a query and the resolved
    /// active source names.
    ///
    /// The query is lowercased and trimmed. The name list is sorted and
    /// hashed so that `[A, B]` and `[B, A]` produce the same key.
    pub fn new(query: &str, source_names: &[&str]) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            source_hash: hash_names(source_names),
        }
    }
}

fn get_or_init_cache(ttl_seconds: u64) -> &'static Cache<CacheKey, Vec<PartItem>> {
    CACHE.get_or_init(|| {
        Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build()
    })
}

/// Look up cached items for the given key.
pub async fn get(key: &CacheKey, ttl_seconds: u64) -> Option<Vec<PartItem>> {
    let cache = get_or_init_cache(ttl_seconds);
    cache.get(key).await
}

/// Insert merged items into the cache.
pub async fn insert(key: CacheKey, items: Vec<PartItem>, ttl_seconds: u64) {
    let cache = get_or_init_cache(ttl_seconds);
    cache.insert(key, items).await;
}

/// Compute a deterministic, order-independent hash of source names.
fn hash_names(names: &[&str]) -> u64 {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_unstable();
    let mut hasher = DefaultHasher::new();
    for name in sorted {
        name.hash(&mut hasher);
    }
    hasher.finish()
}
