use std::fmt;

use serde::{Deserialize, Serialize};

/// A category grouping of discounted products on a merchant page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Value of the `id` attribute of the `<section>` element.
    pub id: String,
    pub display_name: String,
}

/// Insertion-ordered mapping of section id to display name.
///
/// Order drives the section menu. Re-inserting an id keeps its original
/// position and replaces the display name, so the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, display_name: impl Into<String>) {
        let id = id.into();
        let display_name = display_name.into();
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(existing) => existing.display_name = display_name,
            None => self.sections.push(Section { id, display_name }),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.display_name.as_str())
    }

    /// Display name for `id`, or the id itself when it is unknown.
    #[must_use]
    pub fn name_or_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).unwrap_or(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// A non-negative ruble amount with two implied decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    /// Builds a value from a ruble amount. Negative and non-finite inputs
    /// collapse to zero.
    #[must_use]
    pub fn from_rubles(rubles: f64) -> Self {
        if rubles.is_finite() && rubles > 0.0 {
            Self(rubles)
        } else {
            Self::ZERO
        }
    }

    /// Builds a value from a kopeck count, the unit the listing site prints
    /// (`"15000₽"` is 150.00 rubles).
    #[must_use]
    pub fn from_kopecks(kopecks: f64) -> Self {
        Self::from_rubles(kopecks / 100.0)
    }

    #[must_use]
    pub fn rubles(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ₽", self.0)
    }
}

/// One discounted item parsed from a merchant page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// `id` attribute of the product element, e.g. `"id_product_12345"`.
    pub id: String,
    /// Stripped text of the description element, inline prices included.
    pub raw_description: String,
    /// Rendered report line for this product.
    pub description: String,
    pub discounted_price: Money,
    pub original_price: Money,
    /// Discount in percent, rounded to two decimals.
    pub discount_percent: f64,
}
