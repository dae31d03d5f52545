//! One-shot command handlers for inspecting merchant pages from a terminal.
//!
//! Both commands fetch the page once and print to stdout. Unlike the bot,
//! fetch failures are returned as errors so the process exits non-zero.

use skidki_core::{MerchantRegistry, MerchantSource, SectionMap};
use skidki_scraper::{extract_sections, render_section_report, PageClient};

/// Look up a merchant by key, listing the known keys when it is missing.
pub(crate) fn resolve_merchant<'a>(
    merchants: &'a MerchantRegistry,
    key: &str,
) -> anyhow::Result<&'a MerchantSource> {
    merchants.get(key).ok_or_else(|| {
        let known: Vec<&str> = merchants.iter().map(|m| m.key.as_str()).collect();
        anyhow::anyhow!("unknown merchant '{key}' (known: {})", known.join(", "))
    })
}

/// One `id<TAB>name` line per section, in page order.
pub(crate) fn format_sections(sections: &SectionMap) -> String {
    sections
        .iter()
        .map(|s| format!("{}\t{}\n", s.id, s.display_name))
        .collect()
}

/// Print the sections found on a merchant's page.
///
/// # Errors
///
/// Returns an error for an unknown merchant key or a failed fetch.
pub(crate) async fn run_sections(merchants: &MerchantRegistry, key: &str) -> anyhow::Result<()> {
    let merchant = resolve_merchant(merchants, key)?;
    let html = PageClient::new()?.fetch_page(&merchant.url).await?;

    let sections = extract_sections(&html);
    if sections.is_empty() {
        println!("no sections found for {}", merchant.key);
        return Ok(());
    }

    tracing::info!(merchant = %merchant.key, count = sections.len(), "sections extracted");
    print!("{}", format_sections(&sections));
    Ok(())
}

/// Print the discount report for one section, chunked the way the bot
/// would send it.
///
/// # Errors
///
/// Returns an error for an unknown merchant key or a failed fetch.
pub(crate) async fn run_report(
    merchants: &MerchantRegistry,
    key: &str,
    section_id: &str,
    max_message_len: usize,
) -> anyhow::Result<()> {
    let merchant = resolve_merchant(merchants, key)?;
    let html = PageClient::new()?.fetch_page(&merchant.url).await?;

    let sections = extract_sections(&html);
    let section_name = sections.name_or_id(section_id);

    match render_section_report(&html, section_id, section_name, max_message_len) {
        Some(chunks) => {
            for chunk in chunks.iter().filter(|c| !c.trim().is_empty()) {
                println!("{chunk}");
                println!("---");
            }
        }
        None => println!("no products found in section '{section_id}'"),
    }
    Ok(())
}
