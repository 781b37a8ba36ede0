//! Error types for the PartScout service.

/// Top-level error type for the service and the offline cache layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search aggregation error.
    #[error("search error: {0}")]
    Search(#[from] partscout_search::SearchError),

    /// Image relay error.
    #[error("relay error: {0}")]
    Relay(String),

    /// Server bind/serve error.
    #[error("server error: {0}")]
    Server(String),

    /// Cache bucket read/write error.
    #[error("cache error: {0}")]
    Cache(String),

    /// The offline layer could not resolve a request from cache or network.
    #[error("offline: {0}")]
    Offline(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = AppError::Config("port out of range".into());
        assert_eq!(err.to_string(), "config error: port out of range");
    }

    #[test]
    fn search_error_converts() {
        let err: AppError = partscout_search::SearchError::InvalidQuery("empty".into()).into();
        assert!(err.to_string().contains("invalid query"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppError>();
    }
}
