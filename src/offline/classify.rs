//! Pure request classification for the offline cache layer.
//!
//! Every intercepted request falls into exactly one class, checked in
//! priority order: API → image → static (same-origin GET) → unhandled.
//! First match wins; the chain is a pure predicate over request identity
//! and configuration, with no I/O.

use url::Url;

use crate::config::OfflineConfig;
use crate::offline::bucket::RequestKey;

/// The class an intercepted request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Search API request.
    Api,
    /// Image relay request.
    Image,
    /// Same-origin GET for a static asset.
    Static,
    /// Everything else — passed through to the network untouched.
    Unhandled,
}

/// Classify `request` against the configured origin and endpoint prefixes.
///
/// Unparseable URLs are unhandled: the layer never guesses about a request
/// it cannot read.
pub fn classify(request: &RequestKey, config: &OfflineConfig) -> RequestClass {
    let Ok(url) = Url::parse(&request.url) else {
        return RequestClass::Unhandled;
    };

    if url.path().starts_with(&config.api_prefix) {
        return RequestClass::Api;
    }
    if url.path().starts_with(&config.img_prefix) {
        return RequestClass::Image;
    }
    if request.method == "GET" && is_same_origin(&url, &config.origin) {
        return RequestClass::Static;
    }
    RequestClass::Unhandled
}

fn is_same_origin(url: &Url, origin: &str) -> bool {
    Url::parse(origin).is_ok_and(|o| o.origin() == url.origin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OfflineConfig {
        OfflineConfig {
            origin: "http://127.0.0.1:8080".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn api_path_classified_first() {
        let request = RequestKey::get("http://127.0.0.1:8080/api/search?q=W10430302");
        assert_eq!(classify(&request, &config()), RequestClass::Api);
    }

    #[test]
    fn api_match_is_path_based_not_origin_based() {
        // The API class outranks the same-origin check entirely.
        let request = RequestKey::get("http://other.example/api/search?q=x");
        assert_eq!(classify(&request, &config()), RequestClass::Api);
    }

    #[test]
    fn image_relay_path_classified_second() {
        let request = RequestKey::get("http://127.0.0.1:8080/api/img?url=http%3A%2F%2Fcdn%2Fx.jpg");
        assert_eq!(classify(&request, &config()), RequestClass::Image);
    }

    #[test]
    fn same_origin_get_is_static() {
        let request = RequestKey::get("http://127.0.0.1:8080/styles.css");
        assert_eq!(classify(&request, &config()), RequestClass::Static);
    }

    #[test]
    fn cross_origin_get_is_unhandled() {
        let request = RequestKey::get("https://cdn.example.com/styles.css");
        assert_eq!(classify(&request, &config()), RequestClass::Unhandled);
    }

    #[test]
    fn same_origin_post_is_unhandled() {
        let request = RequestKey::new("POST", "http://127.0.0.1:8080/submit");
        assert_eq!(classify(&request, &config()), RequestClass::Unhandled);
    }

    #[test]
    fn unparseable_url_is_unhandled() {
        let request = RequestKey::get("not a url");
        assert_eq!(classify(&request, &config()), RequestClass::Unhandled);
    }
}
