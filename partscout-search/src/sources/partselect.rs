//! PartSelect — the most structured of the retailer catalogs.
//!
//! Search results use `nf__part` card markup with the part number, price,
//! stock state, and manufacturer line exposed as distinct elements, which
//! makes this the richest source for normalized fields.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{absolutize, split_price};
use crate::types::RawItem;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.partselect.com";

/// PartSelect catalog scraper.
///
/// Priority 1 source — reliable markup and OEM-focused listings with
/// explicit manufacturer part numbers.
pub struct PartSelectSource;

impl PartSource for PartSelectSource {
    fn name(&self) -> &'static str {
        "PartSelect"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{BASE_URL}/api/search/?searchterm={}", urlencoding::encode(query))
    }

    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError> {
        parse_partselect_html(html, query)
    }
}

/// Parse a PartSelect results page into raw part records.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_partselect_html(html: &str, _query: &str) -> Result<Vec<RawItem>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse("div.nf__part")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("a.nf__part__detail__title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let number_sel = Selector::parse(".nf__part__detail__part-number strong")
        .map_err(|e| SearchError::Parse(format!("invalid part-number selector: {e:?}")))?;
    let price_sel = Selector::parse(".price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let stock_sel = Selector::parse(".nf__part__left-col__basic-info__stock")
        .map_err(|e| SearchError::Parse(format!("invalid stock selector: {e:?}")))?;
    let maker_sel = Selector::parse(".nf__part__detail__manufacturer")
        .map_err(|e| SearchError::Parse(format!("invalid manufacturer selector: {e:?}")))?;
    let img_sel = Selector::parse("img")
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

        let part_number = card
            .select(&number_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
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

        // Manufacturer line reads "Manufactured by Whirlpool" and flags
        // genuine parts as OEM.
        let maker_line = card
            .select(&maker_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let brand = maker_line
            .strip_prefix("Manufactured by ")
            .map(|b| b.trim().to_string())
            .filter(|s| !s.is_empty());
        let oem = if maker_line.is_empty() {
            None
        } else {
            Some(maker_line.contains("OEM") || brand.is_some())
        };

        let image = card
            .select(&img_sel)
            .next()
            .and_then(|el| el.value().attr("src").or_else(|| el.value().attr("data-src")))
            .and_then(|src| absolutize(BASE_URL, src));

        items.push(RawItem {
            title: Some(title),
            part_number,
            price,
            currency,
            availability,
            image,
            link,
            brand,
            oem,
            ..Default::default()
        });
    }

    tracing::debug!(count = items.len(), "PartSelect items parsed");
    Ok(items)
}
