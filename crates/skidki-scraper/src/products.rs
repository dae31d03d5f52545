//! Product and promotion-period extraction for one merchant page.

use scraper::Selector;
use skidki_core::{Money, ProductRecord};

use crate::html::{selector, Node, Page};
use crate::price::{
    discount_percentage, format_difference, format_percent, format_price, parse_price,
    strip_inline_prices,
};
use crate::sections::SECTION_SELECTOR;

/// Product elements carry ids of the form `id_product_<n>`.
pub const PRODUCT_ID_PREFIX: &str = "id_product_";

/// Returned by [`get_discount_period`] when the page has no period label.
pub const NO_PERIOD_FALLBACK: &str = "Период не указан";

const PERIOD_SELECTOR: &str = r#"div[class="text-sm mt-1"]"#;

struct ProductSelectors {
    product: Selector,
    description: Selector,
    new_price: Selector,
    old_price: Selector,
}

impl ProductSelectors {
    fn new() -> Self {
        Self {
            product: selector("article.product"),
            description: selector("div.product__descr"),
            new_price: selector("span.product__price-new"),
            old_price: selector("span.product__price-old"),
        }
    }
}

/// Extracts every complete product inside the section with id `section_id`.
///
/// A product needs an id starting with [`PRODUCT_ID_PREFIX`], a description,
/// a discounted price and an original price. Anything less is skipped
/// without error. An unknown section yields an empty list.
#[must_use]
pub fn extract_products(html: &str, section_id: &str) -> Vec<ProductRecord> {
    let page = Page::parse(html);
    products_in_page(&page, section_id)
}

/// Reads the promotion period label, or [`NO_PERIOD_FALLBACK`].
#[must_use]
pub fn get_discount_period(html: &str) -> String {
    discount_period_in_page(&Page::parse(html))
}

pub(crate) fn products_in_page(page: &Page, section_id: &str) -> Vec<ProductRecord> {
    let section_sel = selector(SECTION_SELECTOR);
    let Some(section) = page
        .root()
        .find_all(&section_sel)
        .find(|s| s.attr("id") == Some(section_id))
    else {
        tracing::debug!(section_id, "section not present on page");
        return Vec::new();
    };

    let selectors = ProductSelectors::new();
    let products: Vec<ProductRecord> = section
        .find_all(&selectors.product)
        .filter_map(|element| parse_product(element, &selectors))
        .collect();

    tracing::debug!(section_id, count = products.len(), "extracted products");
    products
}

pub(crate) fn discount_period_in_page(page: &Page) -> String {
    page.root()
        .find(&selector(PERIOD_SELECTOR))
        .map_or_else(|| NO_PERIOD_FALLBACK.to_string(), |div| div.stripped_text())
}

fn parse_product(element: Node<'_>, selectors: &ProductSelectors) -> Option<ProductRecord> {
    let id = element
        .attr("id")
        .filter(|id| id.starts_with(PRODUCT_ID_PREFIX))?;

    let (Some(description), Some(new_price), Some(old_price)) = (
        element.find(&selectors.description),
        element.find(&selectors.new_price),
        element.find(&selectors.old_price),
    ) else {
        tracing::trace!(product_id = id, "skipping incomplete product");
        return None;
    };

    let raw_description = description.stripped_text();
    let discounted_text = new_price.stripped_text();
    let original_text = old_price.stripped_text();

    let percent = discount_percentage(&original_text, &discounted_text);
    let description = format!(
        "{}, Скидка: {} (оригинал: {}, разница: {}) - {}%",
        strip_inline_prices(&raw_description),
        format_price(&discounted_text),
        format_price(&original_text),
        format_difference(&original_text, &discounted_text),
        format_percent(percent),
    );

    Some(ProductRecord {
        id: id.to_owned(),
        raw_description,
        description,
        discounted_price: Money::from_kopecks(parse_price(&discounted_text)),
        original_price: Money::from_kopecks(parse_price(&original_text)),
        discount_percent: percent.unwrap_or(0.0),
    })
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
