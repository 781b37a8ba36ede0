//! Trait definition for pluggable catalog-site sources.
//!
//! Each retailer (PartSelect, RepairClinic, AppliancePartsPros, ...)
//! implements [`PartSource`] to provide a uniform contract: build a search
//! URL from a query, and turn a raw results page into part candidates.

use crate::error::SearchError;
use crate::types::RawItem;

/// A pluggable catalog-site source.
///
/// Implementors describe one external retailer. The trait is object-safe
/// and deliberately does no I/O of its own: the aggregator owns fetching,
/// so a source is pure data plus two functions —
///
/// - URL construction with query encoding
/// - HTML parsing via CSS selectors
///
/// Parse failures must be reported through the `Result`, never panicked;
/// the aggregator additionally isolates each source so that a
/// contract-violating parser degrades only its own contribution.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait PartSource: Send + Sync {
    /// Unique, stable source name used for filtering and output attribution.
    fn name(&self) -> &'static str;

    /// Build the absolute search URL for `query`.
    ///
    /// Pure function: same query, same URL. The implementation handles
    /// percent-encoding; callers pass the raw search text.
    fn search_url(&self, query: &str) -> String;

    /// Parse a raw results page into part candidates.
    ///
    /// Returns a possibly-empty sequence of [`RawItem`]s in page order.
    /// `query` is available for sources whose pages need it (e.g. to fill
    /// a part number the listing only implies).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the HTML cannot be processed.
    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal source for exercising trait-object bounds.
    struct MockSource {
        items: Vec<RawItem>,
    }

    impl PartSource for MockSource {
        fn name(&self) -> &'static str {
            "Mock"
        }

        fn search_url(&self, query: &str) -> String {
            format!("https://mock.example/search?q={}", urlencoding::encode(query))
        }

        fn parse(&self, _html: &str, _query: &str) -> Result<Vec<RawItem>, SearchError> {
            if self.items.is_empty() {
                return Err(SearchError::Parse("mock source failure".into()));
            }
            Ok(self.items.clone())
        }
    }

    #[test]
    fn mock_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockSource>();
    }

    #[test]
    fn trait_is_object_safe() {
        let source: Box<dyn PartSource> = Box::new(MockSource { items: vec![] });
        assert_eq!(source.name(), "Mock");
    }

    #[test]
    fn search_url_encodes_query() {
        let source = MockSource { items: vec![] };
        let url = source.search_url("door gasket");
        assert_eq!(url, "https://mock.example/search?q=door%20gasket");
    }

    #[test]
    fn parse_returns_items() {
        let source = MockSource {
            items: vec![RawItem {
                title: Some("Ice Maker".into()),
                ..Default::default()
            }],
        };
        let items = source.parse("<html></html>", "W10430302").expect("should parse");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("Ice Maker"));
    }

    #[test]
    fn parse_reports_failure_through_result() {
        let source = MockSource { items: vec![] };
        let result = source.parse("<html></html>", "W10430302");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("mock source failure"));
    }
}
