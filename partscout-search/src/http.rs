//! Shared HTTP client for catalog-site requests.
//!
//! Provides a configured [`reqwest::Client`] with a fixed identifying
//! User-Agent, cookie support, and decompression. One client is built per
//! search and shared across the concurrent source fetches.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for catalog scraping.
///
/// The client has:
/// - Cookie store enabled (several retailers gate listings behind session cookies)
/// - Per-request timeout slightly above the per-source deadline, so the
///   aggregator's own timeout is the one that fires
/// - The fixed identifying User-Agent from config
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.source_timeout_seconds + 2))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        let config = SearchConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: "CustomBot/1.0".into(),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
