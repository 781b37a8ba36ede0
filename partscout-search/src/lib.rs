//! # partscout-search
//!
//! Concurrent multi-source appliance part search for PartScout.
//!
//! This crate answers a free-text part query by scraping several retailer
//! catalogs directly — no API keys, no external services. It compiles into
//! the PartScout service as a library dependency.
//!
//! ## Design
//!
//! - Scrapes PartSelect, RepairClinic, AppliancePartsPros, Sears
//!   PartsDirect, and ReliableParts using CSS selectors on HTML responses
//! - Queries all active sources concurrently and merges results
//!   source-major, tagging each item with its origin
//! - Isolates per-source failure: a broken or hanging site degrades to an
//!   empty contribution, never an error for the caller
//! - In-memory result cache with configurable TTL
//! - Outbound requests carry a fixed identifying User-Agent
//!
//! ## Best effort
//!
//! Retailer sites change layout at any time; extraction is explicitly
//! best-effort per source, and the per-source parsers are the only place
//! that knowledge lives.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod registry;
pub mod source;
pub mod sources;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use registry::SourceRegistry;
pub use source::PartSource;
pub use types::{AggregatedResponse, PartItem, RawItem, SearchQuery};

/// Search all built-in sources for a part.
///
/// Queries every source in the built-in registry concurrently and returns
/// the merged, source-major ordered item list.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] if the query text is empty and
/// [`SearchError::Config`] if `config` is invalid. Individual source
/// failures are logged but never cause the overall search to fail.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> partscout_search::Result<()> {
/// let config = partscout_search::SearchConfig::default();
/// let response = partscout_search::search("W10430302", &config).await?;
/// for item in &response.items {
///     println!("[{}] {} — {}", item.source, item.title, item.price);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<AggregatedResponse> {
    config.validate()?;
    let registry = SourceRegistry::builtin();
    aggregator::aggregate(&SearchQuery::new(query.trim()), &registry, config).await
}

/// Search with sensible default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str) -> Result<AggregatedResponse> {
    search(query, &SearchConfig::default()).await
}
