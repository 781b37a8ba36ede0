//! The three caching strategies and the class→strategy table.
//!
//! Each strategy is one async function over a bucket, a [`Fetcher`], and a
//! request key — no other state — so all of them are testable with a
//! scripted fetcher and a temp-dir bucket. Bucket writes are best-effort
//! throughout: a failed store is logged and the response still flows.

use std::sync::Arc;

use crate::error::AppError;
use crate::offline::bucket::{CacheBucket, RequestKey, StoredResponse};
use crate::offline::classify::RequestClass;
use crate::offline::fetch::Fetcher;

/// Named caching behaviours bound to request classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Serve cached if present, else fetch-and-store.
    CacheFirst,
    /// Always try the network; fall back to stale cache, then a sentinel.
    NetworkFirst,
    /// Serve cached immediately while refreshing; fetch when cold.
    CacheOrRace,
}

/// The strategy table: which behaviour handles each request class.
///
/// `None` means the request passes through to the network untouched.
pub fn strategy_for(class: RequestClass) -> Option<Strategy> {
    match class {
        RequestClass::Api => Some(Strategy::NetworkFirst),
        RequestClass::Image => Some(Strategy::CacheOrRace),
        RequestClass::Static => Some(Strategy::CacheFirst),
        RequestClass::Unhandled => None,
    }
}

/// The degraded-but-well-formed body served when an API request can reach
/// neither network nor cache. Success status, so callers never have to
/// special-case a network-layer failure.
pub fn offline_sentinel() -> StoredResponse {
    StoredResponse::json(&serde_json::json!({
        "items": [],
        "meta": { "error": "offline" }
    }))
}

fn store_best_effort(bucket: &CacheBucket, request: &RequestKey, response: &StoredResponse) {
    if let Err(err) = bucket.put(request, response) {
        tracing::warn!(bucket = bucket.name(), url = %request.url, error = %err, "cache store failed");
    }
}

/// Cache-first, for static assets.
///
/// # Errors
///
/// Returns the fetch error only when the bucket has no entry and the
/// network fails — there is nothing left to serve.
pub async fn cache_first(
    bucket: &CacheBucket,
    fetcher: &Arc<dyn Fetcher>,
    request: &RequestKey,
) -> Result<StoredResponse, AppError> {
    match bucket.get(request) {
        Ok(Some(cached)) => return Ok(cached),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(url = %request.url, error = %err, "cache read failed, treating as miss");
        }
    }

    let response = fetcher.fetch(request).await?;
    store_best_effort(bucket, request, &response);
    Ok(response)
}

/// Network-first with stale-on-failure, for API requests.
///
/// Never fails: a live response, the last cached response for this exact
/// request, or the offline sentinel — in that order.
pub async fn network_first(
    bucket: &CacheBucket,
    fetcher: &Arc<dyn Fetcher>,
    request: &RequestKey,
) -> StoredResponse {
    match fetcher.fetch(request).await {
        Ok(response) => {
            store_best_effort(bucket, request, &response);
            response
        }
        Err(err) => {
            tracing::warn!(url = %request.url, error = %err, "network failed, falling back to cache");
            match bucket.get(request) {
                Ok(Some(cached)) => cached,
                Ok(None) => offline_sentinel(),
                Err(cache_err) => {
                    tracing::warn!(url = %request.url, error = %cache_err, "stale read failed");
                    offline_sentinel()
                }
            }
        }
    }
}

/// Cache-or-race, for images.
///
/// A cached image is returned immediately regardless of freshness, with a
/// background task refreshing the bucket for next time. With a cold cache
/// the network is awaited; if that also fails the request yields no
/// response and the caller handles the missing image.
pub async fn cache_or_race(
    bucket: &CacheBucket,
    fetcher: &Arc<dyn Fetcher>,
    request: &RequestKey,
) -> Option<StoredResponse> {
    let cached = match bucket.get(request) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(url = %request.url, error = %err, "cache read failed, treating as miss");
            None
        }
    };

    if let Some(cached) = cached {
        let bucket = bucket.clone();
        let fetcher = Arc::clone(fetcher);
        let request = request.clone();
        tokio::spawn(async move {
            match fetcher.fetch(&request).await {
                Ok(response) => store_best_effort(&bucket, &request, &response),
                Err(err) => {
                    tracing::trace!(url = %request.url, error = %err, "background refresh failed")
                }
            }
        });
        return Some(cached);
    }

    match fetcher.fetch(request).await {
        Ok(response) => {
            store_best_effort(bucket, request, &response);
            Some(response)
        }
        Err(err) => {
            tracing::warn!(url = %request.url, error = %err, "image unavailable from cache and network");
            None
        }
    }
}
