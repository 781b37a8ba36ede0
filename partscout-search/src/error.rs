//! Error types for the partscout-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Per-source fetch and parse failures are
//! contained inside the aggregator and never reach callers as errors.

/// Errors that can occur during a part search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search text was empty after trimming.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The source filter resolved to no registered sources.
    #[error("no active sources: {0}")]
    NoActiveSources(String),

    /// An HTTP request to a catalog site failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a catalog site's response HTML.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration or registry setup.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for partscout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_query() {
        let err = SearchError::InvalidQuery("query must not be empty".into());
        assert_eq!(err.to_string(), "invalid query: query must not be empty");
    }

    #[test]
    fn display_no_active_sources() {
        let err = SearchError::NoActiveSources("no registered source matched".into());
        assert_eq!(
            err.to_string(),
            "no active sources: no registered source matched"
        );
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("duplicate source name".into());
        assert_eq!(err.to_string(), "config error: duplicate source name");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
