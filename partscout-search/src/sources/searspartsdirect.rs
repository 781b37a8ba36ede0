//! Sears PartsDirect — card grid with model-compatibility text and
//! substitute part numbers listed per card.

use crate::error::SearchError;
use crate::source::PartSource;
use crate::sources::{absolutize, split_price};
use crate::types::RawItem;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.searspartsdirect.com";

/// Sears PartsDirect catalog scraper.
pub struct SearsPartsDirectSource;

impl PartSource for SearsPartsDirectSource {
    fn name(&self) -> &'static str {
        "SearsPartsDirect"
    }

    fn search_url(&self, query: &str) -> String {
        format!("{BASE_URL}/search?q={}", urlencoding::encode(query))
    }

    fn parse(&self, html: &str, query: &str) -> Result<Vec<RawItem>, SearchError> {
        parse_searspartsdirect_html(html, query)
    }
}

/// Parse a Sears PartsDirect results grid into raw part records.
pub(crate) fn parse_searspartsdirect_html(
    html: &str,
    _query: &str,
) -> Result<Vec<RawItem>, SearchError> {
    let document = Html::parse_document(html);

    let card_sel = Selector::parse(".part-card")
        .map_err(|e| SearchError::Parse(format!("invalid card selector: {e:?}")))?;
    let title_sel = Selector::parse("a.part-card__title")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let number_sel = Selector::parse(".part-card__number")
        .map_err(|e| SearchError::Parse(format!("invalid number selector: {e:?}")))?;
    let price_sel = Selector::parse(".part-card__price")
        .map_err(|e| SearchError::Parse(format!("invalid price selector: {e:?}")))?;
    let model_sel = Selector::parse(".part-card__model")
        .map_err(|e| SearchError::Parse(format!("invalid model selector: {e:?}")))?;
    let subs_sel = Selector::parse(".part-card__substitutes li")
        .map_err(|e| SearchError::Parse(format!("invalid substitutes selector: {e:?}")))?;
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

        let model = card
            .select(&model_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let equivalents: Vec<String> = card
            .select(&subs_sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

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
            model,
            equivalents: if equivalents.is_empty() {
                None
            } else {
                Some(equivalents)
            },
            ..Default::default()
        });
    }

    tracing::debug!(count = items.len(), "SearsPartsDirect items parsed");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="part-card">
  <img src="https://images.searspartsdirect.com/w10430302.jpg"/>
  <a class="part-card__title" href="/product/abc123/ice-maker-w10430302">Ice maker assembly</a>
  <div class="part-card__number">W10430302</div>
  <div class="part-card__model">Kenmore 106.51133210</div>
  <div class="part-card__price">$46.32</div>
  <ul class="part-card__substitutes"><li>AP5985115</li><li>PS11703469</li></ul>
</div>
<div class="part-card">
  <a class="part-card__title" href="/product/def456/shelf">Refrigerator shelf</a>
</div>
</body>
</html>"#;

    #[test]
    fn search_url_encodes_query() {
        let url = SearsPartsDirectSource.search_url("ice maker");
        assert_eq!(url, "https://www.searspartsdirect.com/search?q=ice%20maker");
    }

    #[test]
    fn parse_collects_substitute_numbers() {
        let items = parse_searspartsdirect_html(MOCK_HTML, "W10430302").expect("should parse");
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].equivalents.as_deref(),
            Some(&["AP5985115".to_string(), "PS11703469".to_string()][..])
        );
        assert_eq!(items[0].model.as_deref(), Some("Kenmore 106.51133210"));
    }

    #[test]
    fn parse_card_without_substitutes_leaves_none() {
        let items = parse_searspartsdirect_html(MOCK_HTML, "shelf").expect("should parse");
        assert!(items[1].equivalents.is_none());
        assert!(items[1].price.is_none());
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let items = parse_searspartsdirect_html("<html></html>", "x").expect("should parse");
        assert!(items.is_empty());
    }
}
