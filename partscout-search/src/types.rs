//! Core types for part records, queries, and aggregated responses.

use serde::{Deserialize, Serialize};

/// A part record as extracted directly from one catalog site's HTML,
/// before normalization.
///
/// Every field is optional: scraped pages routinely omit prices, images,
/// or availability, and absence means "unknown", not an error. Parsers
/// fill in what they can find and leave the rest unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Product title as shown on the listing.
    pub title: Option<String>,
    /// Manufacturer or retailer part number.
    pub part_number: Option<String>,
    /// Listed price, verbatim (e.g. `"39.99"`).
    pub price: Option<String>,
    /// Currency code or symbol accompanying the price.
    pub currency: Option<String>,
    /// Stock/availability text (e.g. `"In Stock"`).
    pub availability: Option<String>,
    /// Product image URL.
    pub image: Option<String>,
    /// Detail-page URL on the source site.
    pub link: Option<String>,
    /// Appliance brand the part belongs to.
    pub brand: Option<String>,
    /// Appliance model the listing mentions.
    pub model: Option<String>,
    /// Free-text compatibility notes ("fits models ...").
    pub fits: Option<String>,
    /// Whether the listing is marked as an OEM part.
    pub oem: Option<bool>,
    /// Equivalent/replacement part numbers listed alongside.
    pub equivalents: Option<Vec<String>>,
}

/// A normalized part record: a [`RawItem`] merged with its owning source's
/// name, with every optional field defaulted so all items in a response
/// share a uniform shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartItem {
    /// Name of the source that produced this item.
    pub source: String,
    pub title: String,
    pub part_number: String,
    pub price: String,
    pub currency: String,
    pub availability: String,
    pub image: String,
    pub link: String,
    pub brand: String,
    pub model: String,
    pub fits: String,
    pub oem: bool,
    pub equivalents: Vec<String>,
}

impl PartItem {
    /// Normalize a raw item under the given source name, defaulting every
    /// absent field to empty-string / `false` / empty-list.
    pub fn from_raw(source: &str, raw: RawItem) -> Self {
        Self {
            source: source.to_string(),
            title: raw.title.unwrap_or_default(),
            part_number: raw.part_number.unwrap_or_default(),
            price: raw.price.unwrap_or_default(),
            currency: raw.currency.unwrap_or_default(),
            availability: raw.availability.unwrap_or_default(),
            image: raw.image.unwrap_or_default(),
            link: raw.link.unwrap_or_default(),
            brand: raw.brand.unwrap_or_default(),
            model: raw.model.unwrap_or_default(),
            fits: raw.fits.unwrap_or_default(),
            oem: raw.oem.unwrap_or_default(),
            equivalents: raw.equivalents.unwrap_or_default(),
        }
    }
}

/// A validated search request.
///
/// `source_names` is either empty (meaning "all registered sources") or a
/// caller-supplied subset of registry names. Selection that resolves to
/// zero sources is rejected before any fetch is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty search text.
    pub text: String,
    /// Source-name filter; empty means no filter.
    pub source_names: Vec<String>,
}

impl SearchQuery {
    /// Build a query over all registered sources.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_names: Vec::new(),
        }
    }

    /// Build a query restricted to the named sources.
    pub fn with_sources(text: impl Into<String>, source_names: Vec<String>) -> Self {
        Self {
            text: text.into(),
            source_names,
        }
    }
}

/// The merged result of one search across all active sources.
///
/// Items are source-major ordered: all items from the first active source
/// (in registry order) appear before items from the next, and parser output
/// order is preserved within a source. Identical parts found by two sources
/// appear as two items — no deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// The search text as issued.
    pub query: String,
    /// Normalized items from every source that succeeded.
    pub items: Vec<PartItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_defaults_to_all_unknown() {
        let raw = RawItem::default();
        assert!(raw.title.is_none());
        assert!(raw.oem.is_none());
        assert!(raw.equivalents.is_none());
    }

    #[test]
    fn from_raw_tags_source_and_defaults_fields() {
        let raw = RawItem {
            title: Some("Ice Maker".into()),
            part_number: Some("W10430302".into()),
            price: Some("39.99".into()),
            ..Default::default()
        };
        let item = PartItem::from_raw("PartSelect", raw);
        assert_eq!(item.source, "PartSelect");
        assert_eq!(item.title, "Ice Maker");
        assert_eq!(item.part_number, "W10430302");
        assert_eq!(item.price, "39.99");
        assert_eq!(item.currency, "");
        assert_eq!(item.availability, "");
        assert!(!item.oem);
        assert!(item.equivalents.is_empty());
    }

    #[test]
    fn from_raw_preserves_known_fields() {
        let raw = RawItem {
            oem: Some(true),
            equivalents: Some(vec!["AP5985115".into(), "PS11703469".into()]),
            fits: Some("Fits WRS325FDAM04".into()),
            ..Default::default()
        };
        let item = PartItem::from_raw("RepairClinic", raw);
        assert!(item.oem);
        assert_eq!(item.equivalents.len(), 2);
        assert_eq!(item.fits, "Fits WRS325FDAM04");
    }

    #[test]
    fn part_item_serializes_every_field() {
        let item = PartItem::from_raw("PartSelect", RawItem::default());
        let json = serde_json::to_value(&item).expect("serialize");
        let obj = json.as_object().expect("object");
        // Uniform shape: defaulted fields are present, not omitted.
        assert!(obj.contains_key("price"));
        assert!(obj.contains_key("availability"));
        assert_eq!(obj["oem"], serde_json::Value::Bool(false));
        assert_eq!(obj["source"], "PartSelect");
    }

    #[test]
    fn part_item_serde_round_trip() {
        let item = PartItem::from_raw(
            "SearsPartsDirect",
            RawItem {
                title: Some("Door Gasket".into()),
                price: Some("54.10".into()),
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&item).expect("serialize");
        let decoded: PartItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, item);
    }

    #[test]
    fn search_query_new_means_all_sources() {
        let query = SearchQuery::new("W10430302");
        assert_eq!(query.text, "W10430302");
        assert!(query.source_names.is_empty());
    }

    #[test]
    fn search_query_with_sources_keeps_filter() {
        let query = SearchQuery::with_sources("gasket", vec!["PartSelect".into()]);
        assert_eq!(query.source_names, vec!["PartSelect".to_string()]);
    }

    #[test]
    fn aggregated_response_serde_round_trip() {
        let response = AggregatedResponse {
            query: "W10430302".into(),
            items: vec![PartItem::from_raw("PartSelect", RawItem::default())],
        };
        let json = serde_json::to_string(&response).expect("serialize");
        let decoded: AggregatedResponse = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded.query, "W10430302");
        assert_eq!(decoded.items.len(), 1);
    }
}
