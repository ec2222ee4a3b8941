//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock catalog servers and run the full
//! crawl cycle end-to-end: range resolution, per-page fetching, extraction,
//! and persistence.

use shelf_scrape::config::{CatalogConfig, Config, HttpConfig, OutputConfig};
use shelf_scrape::crawler::crawl;
use shelf_scrape::sink::read_rows;
use shelf_scrape::ScrapeError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, csv_path: &str) -> Config {
    Config {
        catalog: CatalogConfig {
            landing_url: Some(format!("{}/index.html", base_url)),
            page_url_template: format!("{}/catalogue/page-{{page}}.html", base_url),
            first_page: None,
            last_page: None,
            currency_symbol: None,
            price_selector: "p.price_color".to_string(),
            title_selector: "a[title]".to_string(),
            indicator_selector: "li.current".to_string(),
        },
        http: HttpConfig::default(),
        output: OutputConfig {
            csv_path: Some(csv_path.to_string()),
            database_path: None,
        },
    }
}

/// HTML for a catalog page with the given title/price pairs
fn catalog_page(books: &[(&str, &str)]) -> String {
    let articles: String = books
        .iter()
        .map(|(title, price)| {
            format!(
                r#"<article class="product_pod">
                    <a href="book.html" title="{}">thumb</a>
                    <p class="price_color">£{}</p>
                </article>"#,
                title, price
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", articles)
}

/// HTML for a landing page with a pagination indicator
fn landing_page(first: u32, last: u32) -> String {
    format!(
        r#"<html><body>
            <ul class="pager">
                <li class="current">Page {} of {}</li>
            </ul>
        </body></html>"#,
        first, last
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/catalogue/page-{}.html", page)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_with_landing_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing_page(1, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        1,
        catalog_page(&[("A Light in the Attic", "51.77"), ("Sapiens", "54.23")]),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        catalog_page(&[("Sharp Objects", "47.82")]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());

    let report = crawl(config).await.expect("crawl failed");

    assert_eq!(report.pages_attempted, 2);
    assert_eq!(report.pages_skipped, 0);
    assert_eq!(report.records_persisted, 3);
    assert_eq!(report.sink_failures, 0);

    let rows = read_rows(&csv_path).unwrap();
    assert_eq!(rows[0], vec!["Title", "Price"]);
    assert_eq!(rows[1], vec!["A Light in the Attic", "51.77"]);
    assert_eq!(rows[2], vec!["Sapiens", "54.23"]);
    assert_eq!(rows[3], vec!["Sharp Objects", "47.82"]);
}

#[tokio::test]
async fn test_fetch_failure_isolation() {
    let mock_server = MockServer::start().await;

    // Fixed range 1..=3; the middle page returns a server error
    mount_page(&mock_server, 1, catalog_page(&[("First", "1.00")])).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 3, catalog_page(&[("Third", "3.00")])).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());
    config.catalog.landing_url = None;
    config.catalog.first_page = Some(1);
    config.catalog.last_page = Some(3);

    let report = crawl(config).await.expect("crawl failed");

    assert_eq!(report.pages_attempted, 3);
    assert_eq!(report.pages_skipped, 1);
    assert_eq!(report.records_persisted, 2);

    // Sink received records for exactly pages 1 and 3
    let rows = read_rows(&csv_path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "First");
    assert_eq!(rows[2][0], "Third");
}

#[tokio::test]
async fn test_each_page_visited_exactly_once() {
    let mock_server = MockServer::start().await;

    // expect(1) on every page mock; wiremock verifies on drop
    for page in 1..=5 {
        mount_page(
            &mock_server,
            page,
            catalog_page(&[(&format!("Book {}", page), "9.99")]),
        )
        .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());
    config.catalog.landing_url = None;
    config.catalog.first_page = Some(1);
    config.catalog.last_page = Some(5);

    let report = crawl(config).await.expect("crawl failed");
    assert_eq!(report.pages_attempted, 5);

    // Increasing order
    let rows = read_rows(&csv_path).unwrap();
    let titles: Vec<&str> = rows[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(titles, vec!["Book 1", "Book 2", "Book 3", "Book 4", "Book 5"]);
}

#[tokio::test]
async fn test_missing_indicator_aborts_before_page_work() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>no pager</p></body></html>"),
        )
        .mount(&mock_server)
        .await;

    // No catalog page may be fetched when the range cannot be resolved
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());

    let result = crawl(config).await;
    assert!(matches!(result, Err(ScrapeError::Range(_))));
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_unreachable_landing_page_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());

    let result = crawl(config).await;
    assert!(matches!(result, Err(ScrapeError::Landing { .. })));
}

#[tokio::test]
async fn test_count_mismatch_is_reported_not_fatal() {
    let mock_server = MockServer::start().await;

    // Three titles but only two prices: two records, one orphaned title
    let body = r#"<html><body>
        <a href="a.html" title="Alpha">x</a>
        <p class="price_color">£1.00</p>
        <a href="b.html" title="Beta">x</a>
        <p class="price_color">£2.00</p>
        <a href="c.html" title="Gamma">x</a>
    </body></html>"#;
    mount_page(&mock_server, 1, body.to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());
    config.catalog.landing_url = None;
    config.catalog.first_page = Some(1);
    config.catalog.last_page = Some(1);

    let report = crawl(config).await.expect("crawl failed");

    assert_eq!(report.records_persisted, 2);
    assert_eq!(report.orphaned_titles, 1);
    assert_eq!(report.orphaned_prices, 0);

    let rows = read_rows(&csv_path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], vec!["Alpha", "1.00"]);
    assert_eq!(rows[2], vec!["Beta", "2.00"]);
}

#[tokio::test]
async fn test_empty_page_is_not_an_error() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, catalog_page(&[])).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());
    config.catalog.landing_url = None;
    config.catalog.first_page = Some(1);
    config.catalog.last_page = Some(1);

    let report = crawl(config).await.expect("crawl failed");
    assert_eq!(report.pages_attempted, 1);
    assert_eq!(report.pages_skipped, 0);
    assert_eq!(report.records_persisted, 0);
}

#[tokio::test]
async fn test_appending_run_keeps_single_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(catalog_page(&[("Recurring Book", "5.00")])),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let mut config = create_test_config(&mock_server.uri(), &csv_path.display().to_string());
    config.catalog.landing_url = None;
    config.catalog.first_page = Some(1);
    config.catalog.last_page = Some(1);

    // Two runs against the same file
    crawl(config.clone()).await.expect("first run failed");
    crawl(config).await.expect("second run failed");

    let rows = read_rows(&csv_path).unwrap();
    let header_count = rows.iter().filter(|r| r[0] == "Title").count();
    assert_eq!(header_count, 1);
    assert_eq!(rows.len(), 3); // header + one row per run
}
