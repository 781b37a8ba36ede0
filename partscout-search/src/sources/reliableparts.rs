//! ReliableParts — storefront-platform markup, the sparsest of the five.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{absolutize, split_price};
use crate::types::RawItem;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.reliableparts.com";

/// ReliableParts catalog scraper.
pub struct ReliablePartsSource;

impl PartSource for ReliablePartsSource {
    fn name(&self) -> &'static str {
        "ReliableParts"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{BASE_URL}/search?q={}", urlencoding::encode(query))
    }

    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError> {
        parse_reliableparts_html(html, query)
    }
}

pub(crate) fn parse_reliableparts_html(html: &str, _query: &str) -> Result<Vec<RawItem>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse(".product-item")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("a.product-item__name")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let sku_sel = Selector::parse(".product-item__sku")
        .map_err(|e| SearchError::Parse(format!("invalid sku selector: {e:?}")))?;
    let price_sel = Selector::parse(".product-item__price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
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
            .select(&sku_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let (price, currency) = card
            .select(&price_sel)
            .next()
            .map(|el| split_price(&el.text().collect::<String>()))
            .unwrap_or((None, None));

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
            image,
            link,
            ..Default::default()
        });
    }

    tracing::debug!(count = items.len(), "ReliableParts items parsed");
    Ok(items)
}
