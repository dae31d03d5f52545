//! Price text normalization and discount arithmetic.
//!
//! The listing site prints amounts in kopecks glued to the currency sign:
//! `"15000₽"` means 150.00 rubles. Everything here fails soft, since a
//! malformed price must never stop a report from rendering.

use std::sync::LazyLock;

use regex::Regex;

/// Rubles, a trailing two-digit kopeck group, then the ruble sign.
static PRICE_UNITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(\d{2})₽").expect("valid price regex"));

/// Two adjacent amounts with no separator, as embedded in product titles
/// (`"Молоко 3.2%8999₽12999₽"`).
static INLINE_PRICE_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+₽\d*₽").expect("valid inline price regex"));

/// Converts scraped price text to a number.
///
/// Strips the ruble sign, all whitespace (NBSP included) and commas, then
/// parses what remains. Any failure yields `0.0`.
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '₽' && *c != ',' && !c.is_whitespace())
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Renders every kopeck-unit amount found in `text` as `"{rubles}.{kopecks} ₽"`.
///
/// Multiple matches are joined with a single space; no match gives an empty
/// string.
#[must_use]
pub fn format_price(text: &str) -> String {
    PRICE_UNITS_RE
        .captures_iter(text)
        .map(|caps| format!("{}.{} ₽", &caps[1], &caps[2]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percentage saved relative to the original price, rounded to two decimals.
///
/// Returns `0.0` when the original price normalizes to zero.
#[must_use]
pub fn calculate_discount_percentage(original: &str, discounted: &str) -> f64 {
    discount_percentage(original, discounted).unwrap_or(0.0)
}

/// Like [`calculate_discount_percentage`], but `None` when the original price
/// normalizes to zero and no percentage can be computed.
#[must_use]
pub fn discount_percentage(original: &str, discounted: &str) -> Option<f64> {
    let original = parse_price(original);
    let discounted = parse_price(discounted);
    if original == 0.0 {
        return None;
    }
    Some(round2((original - discounted) / original * 100.0))
}

/// Absolute savings in rubles. Inputs are kopeck-unit price texts.
#[must_use]
pub fn price_difference(original: &str, discounted: &str) -> f64 {
    (parse_price(original) - parse_price(discounted)) / 100.0
}

/// [`price_difference`] rendered as `"{:.2} ₽"`.
#[must_use]
pub fn format_difference(original: &str, discounted: &str) -> String {
    format!("{:.2} ₽", price_difference(original, discounted))
}

/// Renders a percentage from [`discount_percentage`].
///
/// Computed values always carry a fractional part (`33.33`, `50.0`, `0.0`).
/// A missing percentage renders as a bare `0`.
#[must_use]
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        None => "0".to_string(),
        Some(p) if p.is_finite() && p.fract() == 0.0 => format!("{p:.1}"),
        Some(p) => format!("{p}"),
    }
}

/// Removes every inline price pair from a description and trims the result.
#[must_use]
pub fn strip_inline_prices(description: &str) -> String {
    INLINE_PRICE_PAIR_RE
        .replace_all(description, "")
        .trim()
        .to_string()
}

/// Rounds to two decimals on the exact binary value, ties to even.
///
/// `f64::round` would send `0.125` to `0.13`; formatting gives `0.12`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
