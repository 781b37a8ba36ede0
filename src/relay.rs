//! Image relay: fetches one external image server-side and forwards its
//! bytes, so the client never talks to retailer CDNs directly and cached
//! copies stay same-origin.

use crate::error::AppError;
use bytes::Bytes;

/// Cache header applied to every relayed image: publicly cacheable for a day.
pub const RELAY_CACHE_CONTROL: &str = "public, max-age=86400";

/// Content type used when the upstream does not declare one.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// A relayed upstream image.
#[derive(Debug, Clone)]
pub struct RelayedImage {
    /// Forwarded content type.
    pub content_type: String,
    /// Raw image bytes.
    pub body: Bytes,
}

/// Fetch `url` and return its bytes with the upstream content type
/// (default `image/jpeg`).
///
/// The upstream status is not inspected — whatever bytes the host serves
/// are forwarded, matching the relay's stream-through contract. Only a
/// transport failure is an error.
///
/// # Errors
///
/// Returns [`AppError::Relay`] if the upstream fetch or body read fails.
pub async fn relay_image(client: &reqwest::Client, url: &str) -> Result<RelayedImage, AppError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Relay(format!("upstream fetch failed: {e}")))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::Relay(format!("upstream body read failed: {e}")))?;

    Ok(RelayedImage { content_type, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn forwards_bytes_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/part.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47])
                    .insert_header("content-type", "image/png"),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let image = relay_image(&client, &format!("{}/part.png", server.uri()))
            .await
            .expect("relay");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.body.as_ref(), &[0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn defaults_content_type_to_jpeg() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let image = relay_image(&client, &server.uri()).await.expect("relay");
        assert_eq!(image.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn transport_failure_is_relay_error() {
        let client = reqwest::Client::new();
        let err = relay_image(&client, "http://127.0.0.1:9/x.jpg").await.unwrap_err();
        assert!(matches!(err, AppError::Relay(_)));
    }
}
