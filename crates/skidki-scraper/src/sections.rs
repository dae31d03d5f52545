//! Category discovery on a merchant page.

use skidki_core::SectionMap;

use crate::html::{selector, Page};

/// Selector for category containers. Only elements with an `id` qualify.
pub(crate) const SECTION_SELECTOR: &str = "section[id]";

/// Visible category title nested inside a section. The class attribute must
/// be exactly this string; spans with extra classes are other labels.
const SECTION_LABEL_SELECTOR: &str = r#"span[class="font-bold md:font-normal"]"#;

/// Collects every `<section>` with a non-empty `id`, in page order.
///
/// The display name is the stripped text of the nested label span, or the
/// id itself when the span is missing. A repeated id keeps its first
/// position and takes the later display name.
#[must_use]
pub fn extract_sections(html: &str) -> SectionMap {
    let page = Page::parse(html);
    let section_sel = selector(SECTION_SELECTOR);
    let label_sel = selector(SECTION_LABEL_SELECTOR);

    let mut sections = SectionMap::new();
    for section in page.root().find_all(&section_sel) {
        let Some(id) = section.attr("id").filter(|id| !id.is_empty()) else {
            continue;
        };
        let name = section
            .find(&label_sel)
            .map_or_else(|| id.to_owned(), |label| label.stripped_text());
        sections.insert(id, name);
    }

    tracing::debug!(count = sections.len(), "extracted sections");
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sections_gives_empty_map() {
        let sections = extract_sections("<html><body><div>пусто</div></body></html>");
        assert!(sections.is_empty());
    }

    #[test]
    fn reads_label_span_and_preserves_order() {
        let html = r#"
            <section id="grocery">
                <h2><span class="font-bold md:font-normal"> Бакалея </span></h2>
            </section>
            <section id="dairy">
                <span class="font-bold md:font-normal">Молочные продукты</span>
            </section>
        "#;
        let sections = extract_sections(html);
        let pairs: Vec<_> = sections
            .iter()
            .map(|s| (s.id.as_str(), s.display_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("grocery", "Бакалея"), ("dairy", "Молочные продукты")]
        );
    }

    #[test]
    fn falls_back_to_id_without_label() {
        let html = r#"<section id="frozen"><span class="font-bold">Заморозка</span></section>"#;
        let sections = extract_sections(html);
        assert_eq!(sections.get("frozen"), Some("frozen"));
    }

    #[test]
    fn label_with_extra_class_is_not_the_title() {
        let html = r#"<section id="grocery">
                <span class="font-bold md:font-normal text-lg">Бакалея</span>
            </section>"#;
        let sections = extract_sections(html);
        assert_eq!(sections.get("grocery"), Some("grocery"));
    }

    #[test]
    fn skips_sections_without_id() {
        let html = r#"<section><span class="font-bold md:font-normal">X</span></section>
                      <section id=""></section>
                      <section id="bakery"></section>"#;
        let sections = extract_sections(html);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("bakery"), Some("bakery"));
    }

    #[test]
    fn duplicate_id_last_name_wins() {
        let html = r#"
            <section id="grocery"><span class="font-bold md:font-normal">Первый</span></section>
            <section id="drinks"><span class="font-bold md:font-normal">Напитки</span></section>
            <section id="grocery"><span class="font-bold md:font-normal">Второй</span></section>
        "#;
        let sections = extract_sections(html);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("grocery"), Some("Второй"));
        assert_eq!(
            sections.iter().next().map(|s| s.id.as_str()),
            Some("grocery")
        );
    }
}
