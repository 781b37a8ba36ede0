//! Core search aggregator: concurrent per-source fan-out with isolated
//! failure, normalization, and source-major merge.
//!
//! Every active source runs its own fetch+parse pipeline in a spawned
//! task under a bounded deadline. Any failure — connect error, non-success
//! status, body read error, parse error, panic, timeout — degrades that
//! source to an empty contribution and is logged; it never aborts sibling
//! sources or the overall call.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{self, CacheKey};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::registry::SourceRegistry;
use crate::source::PartSource;
use crate::types::{AggregatedResponse, PartItem, RawItem, SearchQuery};

/// Run one search across all sources selected by `query`.
///
/// # Pipeline
///
/// 1. Validate the query text and resolve active sources via the registry
/// 2. Serve from the result cache when enabled and warm
/// 3. Fan out one spawned task per source: build URL → fetch with the
///    identifying client header → read body → parse, all under one deadline
/// 4. Collect outcomes in registry order, logging failures at warn level
/// 5. Normalize and flatten: items tagged with their source name,
///    source-major ordered, per-source output order preserved
///
/// No retries are performed — a failed source contributes nothing for this
/// call, and the caller re-issues the whole search to retry.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for empty search text and
/// [`SearchError::NoActiveSources`] when the source filter matches nothing.
/// Per-source failures are contained and never surface here.
pub async fn aggregate(
    query: &SearchQuery,
    registry: &SourceRegistry,
    config: &SearchConfig,
) -> Result<AggregatedResponse, SearchError> {
    if query.text.trim().is_empty() {
        return Err(SearchError::InvalidQuery("search text must not be empty".into()));
    }

    let active = registry.select(&query.source_names);
    if active.is_empty() {
        return Err(SearchError::NoActiveSources(format!(
            "no registered source matched filter {:?}",
            query.source_names
        )));
    }

    let active_names: Vec<&str> = active.iter().map(|s| s.name()).collect();
    let cache_key = CacheKey::new(&query.text, &active_names);
    if config.cache_ttl_seconds > 0 {
        if let Some(items) = cache::get(&cache_key, config.cache_ttl_seconds).await {
            tracing::debug!(query = %query.text, count = items.len(), "serving cached results");
            return Ok(AggregatedResponse {
                query: query.text.clone(),
                items,
            });
        }
    }

    let client = crate::http::build_client(config)?;
    let deadline = Duration::from_secs(config.source_timeout_seconds);

    // Fan out: one spawned task per source, so even a panicking parser is
    // contained to its own pipeline.
    let tasks: Vec<_> = active
        .iter()
        .map(|source| {
            let source = Arc::clone(source);
            let client = client.clone();
            let text = query.text.clone();
            let name = source.name();
            let handle = tokio::spawn(async move {
                match tokio::time::timeout(deadline, fetch_source(&client, source.as_ref(), &text))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(SearchError::Http(format!(
                        "{name} timed out after {}s",
                        deadline.as_secs()
                    ))),
                }
            });
            (name, handle)
        })
        .collect();

    let outcomes =
        futures::future::join_all(tasks.into_iter().map(|(name, handle)| async move {
            (name, handle.await)
        }))
        .await;

    let mut items: Vec<PartItem> = Vec::new();
    for (name, joined) in outcomes {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(join_err) => Err(SearchError::Parse(format!("{name} task failed: {join_err}"))),
        };
        match outcome {
            Ok(mut raw_items) => {
                tracing::debug!(source = name, count = raw_items.len(), "source returned items");
                raw_items.truncate(config.max_items_per_source);
                items.extend(raw_items.into_iter().map(|raw| PartItem::from_raw(name, raw)));
            }
            Err(err) => {
                tracing::warn!(source = name, error = %err, "source degraded to empty contribution");
            }
        }
    }

    if config.cache_ttl_seconds > 0 {
        cache::insert(cache_key, items.clone(), config.cache_ttl_seconds).await;
    }

    Ok(AggregatedResponse {
        query: query.text.clone(),
        items,
    })
}

/// One source's pipeline: build the search URL, fetch it with the shared
/// client, and hand the body to the source's parser.
async fn fetch_source(
    client: &reqwest::Client,
    source: &dyn PartSource,
    query: &str,
) -> Result<Vec<RawItem>, SearchError> {
    let url = source.search_url(query);
    tracing::trace!(source = source.name(), %url, "dispatching catalog fetch");

    let response = client
        .get(&url)
        .header("Accept", "text/html,application/xhtml+xml")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{} request failed: {e}", source.name())))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("{} HTTP error: {e}", source.name())))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{} response read failed: {e}", source.name())))?;

    tracing::trace!(source = source.name(), bytes = html.len(), "catalog response received");

    source.parse(&html, query)
}
