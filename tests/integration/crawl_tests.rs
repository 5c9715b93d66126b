//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog and run the full
//! fetch, parse and persist cycle end-to-end against it.

use book_crawler::config::Config;
use book_crawler::crawler::Coordinator;
use book_crawler::storage::{JsonRecordStore, RecordStore};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock catalog
fn create_test_config(base_url: &str, total_pages: u32, results_dir: &Path) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = base_url.to_string();
    config.catalog.total_pages = total_pages;
    config.crawler.workers = 2;
    config.crawler.user_agent = "TestBot/1.0".to_string();
    config.output.results_dir = results_dir.to_path_buf();
    config
}

fn index_page(slugs: &[&str]) -> String {
    let items: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="{}/index.html" title="{}">{}</a></h3></article></li>"#,
                slug, slug, slug
            )
        })
        .collect();
    format!(r#"<html><body><ol class="row">{}</ol></body></html>"#, items)
}

fn detail_page(title: &str, upc: &str, price: &str, stock: u32) -> String {
    format!(
        r#"<html><body>
<div class="item active"><img src="../../media/cache/{upc}.jpg" alt="{title}" /></div>
<div class="product_main"><h1>{title}</h1>
<p class="price_color">£{price}</p></div>
<p>Description of {title}.</p>
<table class="table table-striped">
<tr><th>UPC</th><td>{upc}</td></tr>
<tr><th>Availability</th><td>In stock ({stock} available)</td></tr>
</table>
</body></html>"#
    )
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

fn count_records(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to read results dir")
        .filter(|e| {
            e.as_ref()
                .map(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                .unwrap_or(false)
        })
        .count()
}

#[tokio::test]
async fn test_full_crawl_writes_one_record_per_book() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        200,
        index_page(&["a-light-in-the-attic_1000", "tipping-the-velvet_999"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/page-2.html",
        200,
        index_page(&["sapiens_996"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/a-light-in-the-attic_1000/index.html",
        200,
        detail_page("A Light in the Attic", "a897fe39b1053632", "51.77", 22),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/tipping-the-velvet_999/index.html",
        200,
        detail_page("Tipping the Velvet", "90fa61229261140a", "53.74", 20),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/sapiens_996/index.html",
        200,
        detail_page("Sapiens: A Brief History of Humankind", "4165285e1663650f", "54.23", 20),
        1,
    )
    .await;

    let temp = TempDir::new().expect("Failed to create temp dir");
    let results = temp.path().join("results");
    let config = create_test_config(&base_url, 2, &results);

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await;

    assert_eq!(count_records(&results), 3);

    let store = JsonRecordStore::open(&results).expect("Failed to open store");
    let record = store.load("A Light in the Attic").expect("Missing record");
    assert_eq!(record.upc.as_deref(), Some("a897fe39b1053632"));
    assert_eq!(record.price.as_deref(), Some("51.77"));
    assert_eq!(record.available_quantity.as_deref(), Some("22"));
    assert_eq!(
        record.thumbnail_path.as_deref(),
        Some("../../media/cache/a897fe39b1053632.jpg")
    );
    assert_eq!(
        record.description.as_deref(),
        Some("Description of A Light in the Attic.")
    );

    // Reserved characters in the title are replaced in the file name
    let sapiens = store
        .load("Sapiens_ A Brief History of Humankind")
        .expect("Missing sanitized record");
    assert_eq!(
        sapiens.title.as_deref(),
        Some("Sapiens: A Brief History of Humankind")
    );
}

#[tokio::test]
async fn test_failed_detail_fetch_is_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        200,
        index_page(&["book-a_1", "book-b_2", "book-c_3"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/page-2.html",
        200,
        index_page(&["book-d_4"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/book-a_1/index.html",
        200,
        detail_page("Book A", "upc-a", "1.00", 1),
        1,
    )
    .await;
    // Fetched exactly once: no retry
    mount_page(
        &mock_server,
        "/catalogue/book-b_2/index.html",
        500,
        String::new(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/book-c_3/index.html",
        200,
        detail_page("Book C", "upc-c", "3.00", 3),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/book-d_4/index.html",
        200,
        detail_page("Book D", "upc-d", "4.00", 4),
        1,
    )
    .await;

    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&base_url, 2, temp.path());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await;

    assert_eq!(count_records(temp.path()), 3);
    assert!(!temp.path().join("Book B.json").exists());
    assert!(temp.path().join("Book C.json").exists());
    assert!(temp.path().join("Book D.json").exists());
}

#[tokio::test]
async fn test_missing_index_page_and_empty_catalog_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/catalogue/page-1.html",
        200,
        index_page(&["only-book_1"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/catalogue/page-2.html", 404, String::new(), 1).await;
    mount_page(
        &mock_server,
        "/catalogue/page-3.html",
        200,
        "<html><body><p>No more books</p></body></html>".to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/catalogue/only-book_1/index.html",
        200,
        "<html><body><h1>Only Book</h1></body></html>".to_string(),
        1,
    )
    .await;

    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&base_url, 3, temp.path());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await;

    let store = JsonRecordStore::open(temp.path()).expect("Failed to open store");
    let record = store.load("Only Book").expect("Missing record");
    assert_eq!(record.title.as_deref(), Some("Only Book"));
    assert_eq!(record.upc, None);
    assert_eq!(record.price, None);
    assert_eq!(record.description, None);
    assert_eq!(count_records(temp.path()), 1);
}

#[tokio::test]
async fn test_unreachable_catalog_still_completes() {
    // Bind and release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind")
        .local_addr()
        .expect("Failed to read address")
        .port();

    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("http://127.0.0.1:{}", port), 4, temp.path());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await;

    assert_eq!(count_records(temp.path()), 0);
}
