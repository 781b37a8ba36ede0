//! RepairClinic — product-grid markup with per-card data attributes.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{absolutize, split_price};
use crate::types::RawItem;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.repairclinic.com";

/// RepairClinic catalog scraper.
///
/// Priority 2 source — broad inventory and a compatibility line
/// ("Fits ...") worth keeping on the normalized record.
pub struct RepairClinicSource;

impl PartSource for RepairClinicSource {
    fn name(&self) -> &'static str {
        "RepairClinic"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{BASE_URL}/Shop-For-Parts?query={}", urlencoding::encode(query))
    }

    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError> {
        parse_repairclinic_html(html, query)
    }
}

/// Parse a RepairClinic results grid into raw part records.
pub(crate) fn parse_repairclinic_html(html: &str, _query: &str) -> Result<Vec<RawItem>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse(".product-grid__item")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("a.product-title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let number_sel = Selector::parse(".product-part-number")
        .map_err(|e| SearchError::Parse(format!("invalid part-number selector: {e:?}")))?;
    let price_sel = Selector::parse(".product-price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let stock_sel = Selector::parse(".product-availability")
        .map_err(|e| SearchError::Parse(format!("invalid availability selector: {e:?}")))?;
    let fits_sel = Selector::parse(".product-fits")
        .map_err(|e| SearchError::Parse(format!("invalid fits selector: {e:?}")))?;
    let img_sel = Selector::parse("img.product-image")
        .map_err(|e| SearchError::Parse(format!("invalid image selector: {e:?}")))?;

    let mut items = Vec::new();

    for card in document.select(&card_sel) {
        let title_el = match card.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let link = title_el
            .value()
            .attr("href")
            .and_then(|href| absolutize(BASE_URL, href));

        // Part number line reads "RepairClinic Item #4389306" or carries
        // the manufacturer number directly in a data attribute.
        let part_number = card
            .value()
            .attr("data-mfr-number")
            .map(str::to_string)
            .or_else(|| {
                card.select(&number_sel).next().map(|el| {
                    el.text()
                        .collect::<String>()
                        .trim()
                        .trim_start_matches("Item #")
                        .trim()
                        .to_string()
                })
            })
            .filter(|s| !s.is_empty());

        let (price, currency) = card
            .select(&price_sel)
            .next()
            .map(|el| split_price(&el.text().collect::<String>()))
            .unwrap_or((None, None));

        let availability = card
            .select(&stock_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let fits = card
            .select(&fits_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let image = card
            .select(&img_sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .and_then(|src| absolutize(BASE_URL, src));

        items.push(RawItem {
            title: Some(title),
            part_number,
            price,
            currency,
            availability,
            image,
            link,
            fits,
            ..Default::default()
        });
    }

    tracing::debug!(count = items.len(), "RepairClinic items parsed");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="product-grid">
<div class="product-grid__item" data-mfr-number="W10430302">
  <img class="product-image" src="https://cdn.repairclinic.com/img/4389306.jpg"/>
  <a class="product-title" href="/PartDetail/Ice-Maker/4389306">Refrigerator Ice Maker Assembly</a>
  <div class="product-part-number">Item #4389306</div>
  <div class="product-price">$43.89</div>
  <div class="product-availability">In Stock</div>
  <div class="product-fits">Fits Whirlpool, KitchenAid, Maytag</div>
</div>
<div class="product-grid__item">
  <a class="product-title" href="/PartDetail/Water-Filter/2255520">Water Filter</a>
  <div class="product-part-number">Item #2255520</div>
</div>
</div>
</body>
</html>"#;

    #[test]
    fn search_url_encodes_query() {
        let url = RepairClinicSource.search_url("ice maker");
        assert_eq!(
            url,
            "https://www.repairclinic.com/Shop-For-Parts?query=ice%20maker"
        );
    }

    #[test]
    fn parse_prefers_manufacturer_number_attribute() {
        let items = parse_repairclinic_html(MOCK_HTML, "W10430302").expect("should parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].part_number.as_deref(), Some("W10430302"));
        assert_eq!(items[0].fits.as_deref(), Some("Fits Whirlpool, KitchenAid, Maytag"));
        assert_eq!(items[0].price.as_deref(), Some("43.89"));
        assert_eq!(items[0].currency.as_deref(), Some("USD"));
    }

    #[test]
    fn parse_falls_back_to_item_number_text() {
        let items = parse_repairclinic_html(MOCK_HTML, "filter").expect("should parse");
        assert_eq!(items[1].part_number.as_deref(), Some("2255520"));
        assert!(items[1].price.is_none());
        assert!(items[1].image.is_none());
    }

    #[test]
    fn parse_absolutizes_detail_links() {
        let items = parse_repairclinic_html(MOCK_HTML, "x").expect("should parse");
        assert_eq!(
            items[0].link.as_deref(),
            Some("https://www.repairclinic.com/PartDetail/Ice-Maker/4389306")
        );
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let items = parse_repairclinic_html("<html></html>", "x").expect("should parse");
        assert!(items.is_empty());
    }
}
