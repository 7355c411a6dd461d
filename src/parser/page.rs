//! Turns one fetched search-results page into structured product records.
//!
//! The selector set mirrors the marketplace's current result markup and is
//! brittle by nature; a layout change shows up as an empty result list, not
//! an error, which is indistinguishable from a genuine zero-hit search.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

use crate::error::ScrapeError;
use crate::models::Product;
use crate::parser::normalize::{parse_price, parse_rating, parse_review_count};

/// Consolidates compiled selectors to avoid per-call overhead.
struct Selectors {
    item: Selector,
    title: Selector,
    link: Selector,
    price: Selector,
    rating: Selector,
    review_count: Selector,
    image: Selector,
}

impl Selectors {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<Selectors>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    item: Selector::parse(r#"div.s-main-slot div[role="listitem"]"#).ok()?,
                    title: Selector::parse("h2 span").ok()?,
                    link: Selector::parse("a").ok()?,
                    price: Selector::parse(".a-price .a-offscreen").ok()?,
                    rating: Selector::parse("i.a-icon-star-small span").ok()?,
                    review_count: Selector::parse(
                        r#"span[data-component-type='s-client-side-analytics']"#,
                    )
                    .ok()?,
                    image: Selector::parse("img.s-image").ok()?,
                })
            })
            .as_ref()
    }
}

fn select_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text: String = item.select(selector).next()?.text().collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn select_attr(item: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    item.select(selector)
        .next()?
        .value()
        .attr(attr)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Builds one product from an item node. Items missing a title or link
/// yield `None` and are skipped by the caller.
fn item_to_product(item: ElementRef<'_>, selectors: &Selectors, base: &Url) -> Option<Product> {
    let title = select_text(item, &selectors.title)?;
    let href = select_attr(item, &selectors.link, "href")?;

    let product_url = base.join(&href).ok().map(|u| u.to_string());
    let price = select_text(item, &selectors.price).and_then(|raw| parse_price(&raw));
    let rating = select_text(item, &selectors.rating).and_then(|raw| parse_rating(&raw));
    let review_count =
        select_text(item, &selectors.review_count).and_then(|raw| parse_review_count(&raw));
    let image_url = select_attr(item, &selectors.image, "src");

    Some(Product::new(
        title,
        price,
        rating,
        review_count,
        product_url,
        image_url,
    ))
}

/// Parses a full results page into products, in document order.
///
/// No item nodes is a legitimate outcome (zero hits) and returns an empty
/// list. One malformed item never aborts the batch.
pub fn parse_results(html: &str, base: &Url) -> Result<Vec<Product>, ScrapeError> {
    let selectors = Selectors::get()
        .ok_or_else(|| ScrapeError::Parsing("result selectors failed to compile".to_string()))?;

    let document = Html::parse_document(html);
    let mut products = Vec::new();
    let mut skipped = 0usize;

    for (idx, item) in document.select(&selectors.item).enumerate() {
        match item_to_product(item, selectors, base) {
            Some(product) => {
                if !product.valid {
                    debug!("item #{} is missing non-critical fields", idx + 1);
                }
                products.push(product);
            }
            None => {
                warn!("item #{} has no title or link, skipping", idx + 1);
                skipped += 1;
            }
        }
    }

    if products.is_empty() && skipped == 0 {
        warn!("no result items found on page (zero hits or selector miss)");
    }

    Ok(products)
}

/// Parses only the first item node, used as a cheap page probe.
pub fn parse_first(html: &str, base: &Url) -> Result<Option<Product>, ScrapeError> {
    let selectors = Selectors::get()
        .ok_or_else(|| ScrapeError::Parsing("result selectors failed to compile".to_string()))?;

    let document = Html::parse_document(html);
    Ok(document
        .select(&selectors.item)
        .next()
        .and_then(|item| item_to_product(item, selectors, base)))
}
