//! AppliancePartsPros — table-less list markup, OEM badges per row.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{absolutize, split_price};
use crate::types::RawItem;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.appliancepartspros.com";

/// AppliancePartsPros catalog scraper.
pub struct AppliancePartsProsSource;

impl PartSource for AppliancePartsProsSource {
    fn name(&self) -> &'static str {
        "AppliancePartsPros"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{BASE_URL}/search.aspx?q={}", urlencoding::encode(query))
    }

    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError> {
        parse_appliancepartspros_html(html, query)
    }
}

/// Parse an AppliancePartsPros results list into raw part records.
pub(crate) fn parse_appliancepartspros_html(
    html: &str,
    _query: &str,
) -> Result<Vec<RawItem>, SearchError> {
    let document = Html::parse_document(html);

    let row_sel = Selector::parse(".parts-list .part-item")
        .map_err(|e| SearchError::Parse(format!("invalid row selector: {e:?}")))?;
    let title_sel = Selector::parse("a.part-item__title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let number_sel = Selector::parse(".part-item__number")
        .map_err(|e| SearchError::Parse(format!("invalid number selector: {e:?}")))?;
    let price_sel = Selector::parse(".part-item__price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let stock_sel = Selector::parse(".part-item__stock")
        .map_err(|e| SearchError::Parse(format!("invalid stock selector: {e:?}")))?;
    let badge_sel = Selector::parse(".part-item__badge--oem")
        .map_err(|e| SearchError::Parse(format!("invalid badge selector: {e:?}")))?;
    let brand_sel = Selector::parse(".part-item__brand")
        .map_err(|e| SearchError::Parse(format!("invalid brand selector: {e:?}")))?;
    let img_sel = Selector::parse("img")
        .map_err(|e| SearchError::Parse(format!("invalid image selector: {e:?}")))?;

    let mut items = Vec::new();

    for row in document.select(&row_sel) {
        let title_el = match row.select(&title_sel).next() {
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

        let part_number = row
            .select(&number_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let (price, currency) = row
            .select(&price_sel)
            .next()
            .map(|el| split_price(&el.text().collect::<String>()))
            .unwrap_or((None, None));

        let availability = row
            .select(&stock_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let brand = row
            .select(&brand_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        // OEM badge is present or absent; absence still tells us the row
        // was inspected, so record an explicit false.
        let oem = Some(row.select(&badge_sel).next().is_some());

        let image = row
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
            brand,
            oem,
            ..Default::default()
        });
    }

    tracing::debug!(count = items.len(), "AppliancePartsPros items parsed");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="parts-list">
<div class="part-item">
  <img src="/images/parts/w10430302.jpg"/>
  <span class="part-item__badge--oem">OEM</span>
  <a class="part-item__title" href="/parts/W10430302-Ice-Maker.htm">Whirlpool Ice Maker W10430302</a>
  <div class="part-item__brand">Whirlpool</div>
  <div class="part-item__number">W10430302</div>
  <div class="part-item__price">$41.75</div>
  <div class="part-item__stock">Ships today</div>
</div>
<div class="part-item">
  <a class="part-item__title" href="/parts/generic-valve.htm">Inlet Valve (aftermarket)</a>
  <div class="part-item__price">$18.20</div>
</div>
</div>
</body>
</html>"#;

    #[test]
    fn search_url_encodes_query() {
        let url = AppliancePartsProsSource.search_url("W10430302");
        assert_eq!(url, "https://www.appliancepartspros.com/search.aspx?q=W10430302");
    }

    #[test]
    fn parse_reads_oem_badge() {
        let items = parse_appliancepartspros_html(MOCK_HTML, "W10430302").expect("should parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].oem, Some(true));
        assert_eq!(items[0].brand.as_deref(), Some("Whirlpool"));
        assert_eq!(items[0].availability.as_deref(), Some("Ships today"));
    }

    #[test]
    fn parse_missing_badge_is_explicit_false() {
        let items = parse_appliancepartspros_html(MOCK_HTML, "valve").expect("should parse");
        assert_eq!(items[1].oem, Some(false));
        assert!(items[1].brand.is_none());
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let items = parse_appliancepartspros_html("<html></html>", "x").expect("should parse");
        assert!(items.is_empty());
    }
}
