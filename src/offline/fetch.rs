//! Network seam for the offline cache layer.
//!
//! Strategies talk to the network only through [`Fetcher`], so the whole
//! layer is testable with a scripted implementation and no sockets.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::AppError;
use crate::offline::bucket::{RequestKey, StoredResponse};

/// Performs one network fetch for the offline layer.
///
/// A fetch fails only on transport problems (connect, timeout, read);
/// a response with a non-success status still resolves. Strategies treat
/// transport failure as "offline" and anything else as a live response.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Execute `request` against the live network.
    async fn fetch(&self, request: &RequestKey) -> Result<StoredResponse, AppError>;
}

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &RequestKey) -> Result<StoredResponse, AppError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AppError::Offline(format!("invalid method {}: {e}", request.method)))?;

        let response = self
            .client
            .request(method, &request.url)
            .send()
            .await
            .map_err(|e| AppError::Offline(format!("fetch failed: {e}")))?;

        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Offline(format!("body read failed: {e}")))?;

        Ok(StoredResponse::new(status, headers, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_captures_status_headers_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("hello")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let request = RequestKey::get(server.uri());
        let response = fetcher.fetch(&request).await.expect("fetch");

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("text/plain"));
        assert_eq!(response.body, b"hello");
    }

    #[tokio::test]
    async fn non_success_status_still_resolves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let response = fetcher
            .fetch(&RequestKey::get(server.uri()))
            .await
            .expect("transport succeeded");
        assert_eq!(response.status, 503);
    }

    #[tokio::test]
    async fn transport_failure_is_error() {
        let fetcher = HttpFetcher::new();
        let result = fetcher
            .fetch(&RequestKey::get("http://127.0.0.1:9/nope"))
            .await;
        assert!(result.is_err());
    }
}
