//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls per-source timeouts, result caps, caching,
//! and the outbound client identity. The defaults are tuned for reliable,
//! polite scraping of retailer catalogs.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Fixed identifying User-Agent sent with every catalog fetch.
///
/// Sources are scraped openly: the bot identifies itself rather than
/// impersonating a browser session.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (PartScoutBot; +https://github.com/saorsa-labs/partscout)";

/// Configuration for a part search operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bounded deadline for each per-source fetch+parse pipeline, in
    /// seconds. Expiry degrades that source to an empty contribution.
    pub source_timeout_seconds: u64,
    /// Maximum items kept per source after parsing.
    pub max_items_per_source: usize,
    /// How long to cache aggregated responses in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Identifying User-Agent for outbound requests.
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source_timeout_seconds: 8,
            max_items_per_source: 25,
            cache_ttl_seconds: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `source_timeout_seconds` must be greater than 0
    /// - `max_items_per_source` must be greater than 0
    /// - `user_agent` must not be empty
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.source_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "source_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_items_per_source == 0 {
            return Err(SearchError::Config(
                "max_items_per_source must be greater than 0".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user_agent must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.source_timeout_seconds, 8);
        assert_eq!(config.max_items_per_source, 25);
        assert_eq!(config.cache_ttl_seconds, 0);
        assert!(config.user_agent.contains("PartScoutBot"));
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            source_timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source_timeout_seconds"));
    }

    #[test]
    fn zero_max_items_rejected() {
        let config = SearchConfig {
            max_items_per_source: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_items_per_source"));
    }

    #[test]
    fn blank_user_agent_rejected() {
        let config = SearchConfig {
            user_agent: "  ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"source_timeout_seconds": 3}"#).expect("deserialize");
        assert_eq!(config.source_timeout_seconds, 3);
        assert_eq!(config.max_items_per_source, 25);
    }
}
