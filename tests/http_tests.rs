//! Integration tests for the HTTP fetcher
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher's status handling, retries, and redirects, then a full walk over HTTP.

mod common;

use catalog_crawler::config::UserAgentConfig;
use catalog_crawler::crawler::{build_http_client, walk_catalog, HttpFetcher, PageFetcher};
use catalog_crawler::{CrawlError, FetchFailure};
use common::{card, detail, listing};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    }
}

fn create_test_fetcher(max_retries: u32) -> HttpFetcher {
    let client = build_http_client(&create_test_user_agent(), Duration::from_secs(5))
        .expect("Failed to build client");
    HttpFetcher::new(client, Duration::ZERO).with_retries(max_retries, Duration::from_millis(10))
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn url_on(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("Failed to build URL")
}

#[tokio::test]
async fn test_fetch_success_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html(listing(&[], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let target = url_on(&mock_server, "/catalogue/page-1.html");
    let page = create_test_fetcher(0)
        .fetch(&target)
        .await
        .expect("fetch should succeed");

    assert_eq!(page.url(), &target);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let target = url_on(&mock_server, "/missing.html");
    let err = create_test_fetcher(3).fetch(&target).await.unwrap_err();

    assert_eq!(err.kind, FetchFailure::Status(404));
    assert_eq!(err.url, target.to_string());
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky.html"))
        .respond_with(html(listing(&[], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_test_fetcher(2)
        .fetch(&url_on(&mock_server, "/flaky.html"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_server_error_after_retries_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let err = create_test_fetcher(1)
        .fetch(&url_on(&mock_server, "/down.html"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FetchFailure::Status(500));
    assert!(err.kind.is_transient());
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow.html"))
        .respond_with(html(listing(&[], None)).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&create_test_user_agent(), Duration::from_millis(200))
        .expect("Failed to build client");
    let fetcher = HttpFetcher::new(client, Duration::ZERO);

    let err = fetcher
        .fetch(&url_on(&mock_server, "/slow.html"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FetchFailure::Timeout);
}

#[tokio::test]
async fn test_full_walk_over_http() {
    let mock_server = MockServer::start().await;

    // The entry point redirects into the catalogue, so later links resolve there
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/catalogue/page-1.html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(html(listing(
            &[card(
                "A Light in the Attic",
                "a-light-in-the-attic_1000/index.html",
                "£51.77",
                "Three",
                "In stock (22 available)",
            )],
            Some("page-2.html"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(html(listing(
            &[card(
                "Soumission",
                "soumission_998/index.html",
                "£50.10",
                "One",
                "In stock (20 available)",
            )],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/a-light-in-the-attic_1000/index.html"))
        .respond_with(html(detail("a897fe39b1053632", "Poetry", "A Light in the Attic")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/catalogue/soumission_998/index.html"))
        .respond_with(html(detail("6957f44c3847a760", "Fiction", "Soumission")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = walk_catalog(create_test_fetcher(0), url_on(&mock_server, "/"))
        .await
        .expect("walk should succeed");

    assert_eq!(items.len(), 2);
    let first = items.get(0).unwrap();
    assert_eq!(
        first.detail_url,
        url_on(&mock_server, "/catalogue/a-light-in-the-attic_1000/index.html")
    );
    assert_eq!(first.identifier, "a897fe39b1053632");
    assert_eq!(first.category, "Poetry");
    assert_eq!(items.get(1).unwrap().title, "Soumission");
}

#[tokio::test]
async fn test_walk_fails_on_missing_detail_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(html(listing(
            &[card(
                "Gone",
                "gone_1/index.html",
                "£1.00",
                "One",
                "In stock",
            )],
            None,
        )))
        .mount(&mock_server)
        .await;

    let err = walk_catalog(
        create_test_fetcher(0),
        url_on(&mock_server, "/catalogue/page-1.html"),
    )
    .await
    .unwrap_err();

    match err {
        CrawlError::Fetch(fetch) => {
            assert_eq!(fetch.kind, FetchFailure::Status(404));
            assert!(fetch.url.ends_with("/catalogue/gone_1/index.html"));
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}
