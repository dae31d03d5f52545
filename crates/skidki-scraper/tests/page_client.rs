//! Integration tests for `PageClient::fetch_page` and the extract pipeline.
//!
//! Uses `wiremock` to serve merchant pages locally so no real network traffic
//! is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skidki_scraper::{extract_sections, render_section_report, PageClient, ScraperError};

fn test_client() -> PageClient {
    PageClient::new().expect("failed to build test PageClient")
}

const MERCHANT_PAGE: &str = r#"<!doctype html>
<html><body>
  <div class="text-sm mt-1">Акции с 14.10 по 20.10</div>
  <section id="grocery">
    <h2><span class="font-bold md:font-normal">Бакалея</span></h2>
    <article class="product" id="id_product_1">
      <div class="product__descr">Гречка 900 г 10000₽15000₽</div>
      <span class="product__price-new">10000₽</span>
      <span class="product__price-old">15000₽</span>
    </article>
  </section>
  <section id="dairy">
    <h2><span class="font-bold md:font-normal">Молочные продукты</span></h2>
  </section>
</body></html>"#;

#[tokio::test]
async fn fetch_page_returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/actions/magnit-magazin/krasnodar/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MERCHANT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/actions/magnit-magazin/krasnodar/", server.uri());
    let body = test_client().fetch_page(&url).await;

    assert!(body.is_ok(), "expected Ok, got: {body:?}");
    assert!(body.unwrap().contains("id_product_1"));
}

#[tokio::test]
async fn fetch_page_maps_404_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing/", server.uri());
    let err = test_client().fetch_page(&url).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 404, ref url } if url.ends_with("/missing/")),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_does_not_retry_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client().fetch_page(&server.uri()).await.unwrap_err();
    assert!(matches!(
        err,
        ScraperError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn fetch_page_reports_connection_failure() {
    // Bind then drop a server so the port is very likely closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let err = test_client().fetch_page(&uri).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::Http(_)),
        "expected Http error, got: {err:?}"
    );
}

#[tokio::test]
async fn fetched_page_feeds_the_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MERCHANT_PAGE))
        .mount(&server)
        .await;

    let html = test_client()
        .fetch_page(&server.uri())
        .await
        .expect("page fetched");

    let sections = extract_sections(&html);
    let names: Vec<_> = sections.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, ["Бакалея", "Молочные продукты"]);

    let chunks = render_section_report(&html, "grocery", sections.name_or_id("grocery"), 4096)
        .expect("grocery has products");
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].contains("Период действия скидок: Акции с 14.10 по 20.10"));
    assert!(chunks[0].contains(
        "Гречка 900 г, Скидка: 100.00 ₽ (оригинал: 150.00 ₽, разница: 50.00 ₽) - 33.33%"
    ));

    assert!(render_section_report(&html, "dairy", "Молочные продукты", 4096).is_none());
}
