//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! discovery + scrape cycle end-to-end.

use sitemap_seo::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use sitemap_seo::{scrape_sitemap, DefaultParser, SeoRecord, SitemapScraper};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(request_timeout_secs: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            concurrency: 3,
            request_timeout_secs,
            phase_timeout_secs: Some(30),
        },
        user_agent: UserAgentConfig::default(),
        output: OutputConfig::default(),
    }
}

fn sitemap_index(base_url: &str, paths: &[&str]) -> String {
    let entries: String = paths
        .iter()
        .map(|p| format!("<sitemap><loc>{}{}</loc></sitemap>", base_url, p))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

fn urlset(base_url: &str, paths: &[&str]) -> String {
    let entries: String = paths
        .iter()
        .map(|p| format!("<url><loc>{}{}</loc></url>", base_url, p))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn html_page(title: &str) -> String {
    format!(
        r#"<html><head><title>{}</title>
        <meta name="description" content="About {}"></head>
        <body><h1>{}</h1></body></html>"#,
        title, title, title
    )
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a root index -> two child sitemaps -> 5 pages
async fn mount_two_level_site(server: &MockServer) {
    let base_url = server.uri();

    mount_xml(
        server,
        "/sitemap.xml",
        sitemap_index(&base_url, &["/sitemap-posts.xml", "/sitemap-pages.xml"]),
    )
    .await;
    mount_xml(
        server,
        "/sitemap-posts.xml",
        urlset(&base_url, &["/posts/one", "/posts/two", "/posts/three"]),
    )
    .await;
    mount_xml(
        server,
        "/sitemap-pages.xml",
        urlset(&base_url, &["/about", "/contact"]),
    )
    .await;

    for (route, title) in [
        ("/posts/one", "One"),
        ("/posts/two", "Two"),
        ("/posts/three", "Three"),
        ("/about", "About"),
        ("/contact", "Contact"),
    ] {
        mount_html(server, route, html_page(title)).await;
    }
}

fn sorted(mut records: Vec<SeoRecord>) -> Vec<SeoRecord> {
    records.sort_by(|a, b| a.url.cmp(&b.url));
    records
}

#[tokio::test]
async fn test_two_level_sitemap_tree() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_level_site(&mock_server).await;

    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");

    let mut pages = scraper
        .discover_only(&format!("{}/sitemap.xml", base_url))
        .await;
    pages.sort();

    let mut expected: Vec<String> = ["/about", "/contact", "/posts/one", "/posts/three", "/posts/two"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    expected.sort();
    assert_eq!(pages, expected);

    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;
    assert_eq!(report.pages_discovered, 5);
    assert_eq!(report.records.len(), 5);

    let titles: Vec<String> = sorted(report.records)
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["About", "Contact", "One", "Three", "Two"]);
}

#[tokio::test]
async fn test_record_with_missing_h1() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base_url, &["/foo"])).await;
    mount_html(
        &mock_server,
        "/foo",
        r#"<html><head><title>Foo</title>
        <meta name="description" content="Everything about foo"></head>
        <body><p>No heading here</p></body></html>"#
            .to_string(),
    )
    .await;

    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(
        report.records,
        vec![SeoRecord {
            url: format!("{}/foo", base_url),
            title: "Foo".to_string(),
            h1: String::new(),
            meta_description: "Everything about foo".to_string(),
            status_code: 200,
        }]
    );
}

#[tokio::test]
async fn test_timed_out_page_contributes_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(
        &mock_server,
        "/sitemap.xml",
        urlset(&base_url, &["/fast", "/slow"]),
    )
    .await;
    mount_html(&mock_server, "/fast", html_page("Fast")).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page("Slow"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let scraper = SitemapScraper::new(&create_test_config(1)).expect("Failed to build scraper");

    let started = std::time::Instant::now();
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(report.pages_discovered, 2);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].title, "Fast");
}

#[tokio::test]
async fn test_crawl_is_idempotent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_level_site(&mock_server).await;

    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");
    let seed = format!("{}/sitemap.xml", base_url);

    let first = sorted(scraper.run(&seed).await.records);
    let second = sorted(scraper.run(&seed).await.records);

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_redirected_page_reports_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base_url, &["/old"])).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/new", html_page("New")).await;

    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].url, format!("{}/new", base_url));
    assert_eq!(report.records[0].title, "New");
    assert_eq!(report.records[0].status_code, 200);
}

#[tokio::test]
async fn test_error_status_still_produces_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_xml(&mock_server, "/sitemap.xml", urlset(&base_url, &["/gone"])).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("<html><head><title>Not Found</title></head></html>"),
        )
        .mount(&mock_server)
        .await;

    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].status_code, 404);
    assert_eq!(report.records[0].title, "Not Found");
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .and(header("user-agent", "OnlyAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&base_url, &["/page"])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "OnlyAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Page")))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(5);
    config.user_agent.pool = vec!["OnlyAgent/1.0".to_string()];

    let scraper = SitemapScraper::new(&config).expect("Failed to build scraper");
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].title, "Page");
}

#[tokio::test]
async fn test_missing_seed_yields_empty_result() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Unmatched routes answer 404 with an empty body
    let scraper = SitemapScraper::new(&create_test_config(5)).expect("Failed to build scraper");
    let report = scraper.run(&format!("{}/sitemap.xml", base_url)).await;

    assert_eq!(report.pages_discovered, 0);
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_scrape_sitemap_entry_point() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_level_site(&mock_server).await;

    let records = scrape_sitemap(&format!("{}/sitemap.xml", base_url), DefaultParser, 2)
        .await
        .expect("Failed to build HTTP client");

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.status_code == 200));
    assert!(records.iter().all(|r| r.meta_description.starts_with("About ")));
}
