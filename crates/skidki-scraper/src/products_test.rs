use super::*;

fn product_html(id: &str, descr: Option<&str>, new: Option<&str>, old: Option<&str>) -> String {
    let mut out = format!(r#"<article class="product product--card" id="{id}">"#);
    if let Some(d) = descr {
        out.push_str(&format!(r#"<div class="product__descr">{d}</div>"#));
    }
    out.push_str(r#"<div class="product__prices">"#);
    if let Some(n) = new {
        out.push_str(&format!(r#"<span class="product__price-new">{n}</span>"#));
    }
    if let Some(o) = old {
        out.push_str(&format!(r#"<span class="product__price-old">{o}</span>"#));
    }
    out.push_str("</div></article>");
    out
}

fn page(sections: &[(&str, Vec<String>)]) -> String {
    let mut body = String::from(r#"<div class="text-sm mt-1">с 14 по 20 октября</div>"#);
    for (id, products) in sections {
        body.push_str(&format!(r#"<section id="{id}">"#));
        for p in products {
            body.push_str(p);
        }
        body.push_str("</section>");
    }
    format!("<html><body>{body}</body></html>")
}

#[test]
fn grocery_scenario_computes_discount() {
    let html = page(&[(
        "grocery",
        vec![product_html(
            "id_product_1",
            Some("Гречка 900 г"),
            Some("10000₽"),
            Some("15000₽"),
        )],
    )]);

    let products = extract_products(&html, "grocery");
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.id, "id_product_1");
    assert!((product.discount_percent - 33.33).abs() < 1e-9);
    assert!(product.description.contains("- 33.33%"));
    assert_eq!(
        product.description,
        "Гречка 900 г, Скидка: 100.00 ₽ (оригинал: 150.00 ₽, разница: 50.00 ₽) - 33.33%"
    );
    assert_eq!(product.discounted_price.to_string(), "100.00 ₽");
    assert_eq!(product.original_price.to_string(), "150.00 ₽");
}

#[test]
fn inline_prices_are_stripped_from_description() {
    let html = page(&[(
        "dairy",
        vec![product_html(
            "id_product_7",
            Some("Молоко 3,2% 1 л 8999₽12999₽"),
            Some("8999₽"),
            Some("12999₽"),
        )],
    )]);

    let products = extract_products(&html, "dairy");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].raw_description, "Молоко 3,2% 1 л 8999₽12999₽");
    assert!(
        products[0]
            .description
            .starts_with("Молоко 3,2% 1 л, Скидка: 89.99 ₽ (оригинал: 129.99 ₽, разница: 40.00 ₽)"),
        "unexpected description: {}",
        products[0].description
    );
}

#[test]
fn incomplete_products_are_skipped() {
    let html = page(&[(
        "grocery",
        vec![
            product_html("id_product_1", None, Some("100₽"), Some("200₽")),
            product_html("id_product_2", Some("Сахар"), None, Some("200₽")),
            product_html("id_product_3", Some("Соль"), Some("100₽"), None),
            product_html("id_product_4", Some("Мука"), Some("10000₽"), Some("20000₽")),
        ],
    )]);

    let products = extract_products(&html, "grocery");
    let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["id_product_4"]);
}

#[test]
fn products_without_marker_id_are_skipped() {
    let html = page(&[(
        "grocery",
        vec![
            product_html("banner_1", Some("Реклама"), Some("100₽"), Some("200₽")),
            product_html("id_product_9", Some("Рис"), Some("10000₽"), Some("20000₽")),
        ],
    )]);

    let products = extract_products(&html, "grocery");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "id_product_9");
}

#[test]
fn only_requested_section_is_read() {
    let html = page(&[
        (
            "grocery",
            vec![product_html("id_product_1", Some("Гречка"), Some("100₽"), Some("200₽"))],
        ),
        (
            "dairy",
            vec![product_html("id_product_2", Some("Кефир"), Some("100₽"), Some("200₽"))],
        ),
    ]);

    let products = extract_products(&html, "dairy");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "id_product_2");
}

#[test]
fn unknown_section_gives_empty_list() {
    let html = page(&[(
        "grocery",
        vec![product_html("id_product_1", Some("Гречка"), Some("100₽"), Some("200₽"))],
    )]);
    assert!(extract_products(&html, "bakery").is_empty());
}

#[test]
fn malformed_prices_render_with_zero_discount() {
    let html = page(&[(
        "grocery",
        vec![product_html("id_product_1", Some("Чай"), Some("скоро"), Some("—"))],
    )]);

    let products = extract_products(&html, "grocery");
    assert_eq!(products.len(), 1);
    assert!(products[0].discount_percent.abs() < f64::EPSILON);
    assert_eq!(
        products[0].description,
        "Чай, Скидка:  (оригинал: , разница: 0.00 ₽) - 0%"
    );
}

#[test]
fn whole_percentages_keep_one_decimal() {
    let html = page(&[(
        "grocery",
        vec![
            product_html("id_product_1", Some("Рис"), Some("5000₽"), Some("10000₽")),
            product_html("id_product_2", Some("Соль"), Some("5000₽"), Some("5000₽")),
        ],
    )]);

    let products = extract_products(&html, "grocery");
    assert_eq!(products.len(), 2);
    assert!(products[0].description.ends_with(" - 50.0%"), "{}", products[0].description);
    assert!(products[1].description.ends_with(" - 0.0%"), "{}", products[1].description);
}

#[test]
fn discount_period_is_read() {
    let html = page(&[]);
    assert_eq!(get_discount_period(&html), "с 14 по 20 октября");
}

#[test]
fn discount_period_falls_back_when_absent() {
    assert_eq!(get_discount_period("<html></html>"), NO_PERIOD_FALLBACK);
    assert_eq!(
        get_discount_period(r#"<div class="text-sm mt-2">x</div>"#),
        "Период не указан"
    );
}
