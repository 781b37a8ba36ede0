//! Catalog source implementations.
//!
//! Each module provides a struct implementing [`crate::source::PartSource`]
//! that builds a search URL for a specific retailer and scrapes its results
//! page. Selectors track live site markup and are best-effort: a layout
//! change breaks one source, not the search.

pub mod appliancepartspros;
pub mod partselect;
pub mod reliableparts;
pub mod repairclinic;
pub mod searspartsdirect;

pub use appliancepartspros::AppliancePartsProsSource;
pub use partselect::PartSelectSource;
pub use reliableparts::ReliablePartsSource;
pub use repairclinic::RepairClinicSource;
pub use searspartsdirect::SearsPartsDirectSource;

use url::Url;

/// Resolve a possibly-relative href against a site base URL.
///
/// Returns `None` when neither the href nor the join produces a valid URL.
pub(crate) fn absolutize(base: &str, href: &str) -> Option<String> {
    if href.is_empty() {
        return None;
    }
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.into());
    }
    Url::parse(base)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.into())
}

/// Split a listed price like `"$39.99"` into a bare amount and a currency
/// code. Unrecognised formats keep the raw text as the amount with no
/// currency.
pub(crate) fn split_price(text: &str) -> (Option<String>, Option<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (None, None);
    }
    if let Some(rest) = trimmed.strip_prefix("CA$").or_else(|| trimmed.strip_prefix("C$")) {
        return (Some(rest.trim().to_string()), Some("CAD".to_string()));
    }
    if let Some(rest) = trimmed.strip_prefix('$') {
        return (Some(rest.trim().to_string()), Some("USD".to_string()));
    }
    (Some(trimmed.to_string()), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_absolute_href() {
        let url = absolutize("https://a.example", "https://b.example/p/1");
        assert_eq!(url.as_deref(), Some("https://b.example/p/1"));
    }

    #[test]
    fn absolutize_joins_relative_href() {
        let url = absolutize("https://a.example", "/parts/W10430302.htm");
        assert_eq!(url.as_deref(), Some("https://a.example/parts/W10430302.htm"));
    }

    #[test]
    fn absolutize_empty_href_is_none() {
        assert!(absolutize("https://a.example", "").is_none());
    }

    #[test]
    fn split_price_dollar() {
        assert_eq!(
            split_price("$39.99"),
            (Some("39.99".to_string()), Some("USD".to_string()))
        );
    }

    #[test]
    fn split_price_canadian() {
        assert_eq!(
            split_price("CA$ 54.10"),
            (Some("54.10".to_string()), Some("CAD".to_string()))
        );
    }

    #[test]
    fn split_price_unrecognised_kept_verbatim() {
        assert_eq!(split_price("Call for price"), (Some("Call for price".to_string()), None));
    }

    #[test]
    fn split_price_blank_is_none() {
        assert_eq!(split_price("   "), (None, None));
    }
}
