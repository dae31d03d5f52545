//! Thin DOM query layer over the `scraper` crate.
//!
//! Extractors only need three lookups: every element matching a selector,
//! the first nested match, and attribute reads. Keeping them here means the
//! section and product extractors never touch `scraper` node types directly.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parses a full document. The parser is lenient: malformed markup still
    /// yields a tree, it just may not contain the expected elements.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node(self.document.root_element())
    }
}

/// A borrowed element inside a [`Page`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// All descendants matching `selector`, in document order.
    pub fn find_all<'s>(&self, selector: &'s Selector) -> impl Iterator<Item = Node<'a>> + 's
    where
        'a: 's,
    {
        self.0.select(selector).map(Node)
    }

    /// First descendant matching `selector`.
    #[must_use]
    pub fn find(&self, selector: &Selector) -> Option<Node<'a>> {
        self.0.select(selector).next().map(Node)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Every descendant text node trimmed, empty ones dropped, the rest
    /// concatenated with no separator.
    #[must_use]
    pub fn stripped_text(&self) -> String {
        self.0
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Parses a selector literal.
///
/// # Panics
///
/// Panics if `css` is not a valid selector. Only call with string literals.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}
