//! Report rendering and message chunking.

use skidki_core::ProductRecord;

use crate::html::Page;
use crate::products::{discount_period_in_page, products_in_page};

/// Renders the report for one section.
///
/// Products are ordered by discount, largest first. The sort is stable, so
/// ties keep extraction order.
#[must_use]
pub fn build_report(products: &[ProductRecord], section_name: &str, period: &str) -> String {
    let mut ordered: Vec<&ProductRecord> = products.iter().collect();
    ordered.sort_by(|a, b| b.discount_percent.total_cmp(&a.discount_percent));

    let mut report = format!("\nПериод действия скидок: {period}\n");
    report.push_str(&format!("\nРаздел: {section_name}\n"));
    for product in ordered {
        report.push_str(&product.description);
        report.push_str("\n\n");
    }
    report
}

/// Splits `message` into chunks of at most `max_length` characters.
///
/// Each cut happens at the last newline before the limit, or exactly at the
/// limit when there is none. The remainder is left-trimmed before the next
/// round, and whatever is left at the end is always pushed as the final
/// chunk. A cut at index zero produces an empty chunk; senders skip those.
#[must_use]
pub fn split_message(message: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);
    let mut chunks = Vec::new();
    let mut rest = message;

    // `limit` is the byte offset of char `max_length`; it exists only while
    // more than `max_length` chars remain.
    while let Some((limit, _)) = rest.char_indices().nth(max_length) {
        let split_at = rest[..limit].rfind('\n').unwrap_or(limit);
        chunks.push(rest[..split_at].to_string());
        rest = rest[split_at..].trim_start();
    }
    chunks.push(rest.to_string());
    chunks
}

/// Full pipeline for one section of an already fetched page.
///
/// Returns `None` when the section holds no complete products.
#[must_use]
pub fn render_section_report(
    html: &str,
    section_id: &str,
    section_name: &str,
    max_length: usize,
) -> Option<Vec<String>> {
    let page = Page::parse(html);
    let products = products_in_page(&page, section_id);
    if products.is_empty() {
        return None;
    }
    let period = discount_period_in_page(&page);
    let report = build_report(&products, section_name, &period);
    Some(split_message(&report, max_length))
}
