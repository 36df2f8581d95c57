//! Page fetching
//!
//! This module defines the fetch contract the walker depends on and its HTTP
//! implementation:
//! - `Page`: a parsed document together with the URL it was fetched from
//! - `PageFetcher`: the injected fetch capability (fakes implement it in tests)
//! - `HttpFetcher`: reqwest-backed fetcher with a fixed politeness delay and
//!   retries for transient failures

use crate::config::CrawlerConfig;
use crate::config::UserAgentConfig;
use crate::{FetchError, FetchFailure};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// A parsed document and the absolute URL it was fetched from
///
/// The URL is the base for every relative link found in the document.
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    /// Parses `html` as a document fetched from `url`
    pub fn parse(url: Url, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("url", &self.url.as_str()).finish()
    }
}

/// Fetches one page per call
///
/// Implementations perform exactly one logical access per call and report any
/// non-success response or transport failure as a `FetchError`. Retry and delay
/// policy belong to the implementation; the walker never retries.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

impl<F: PageFetcher> PageFetcher for &F {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy; the final URL becomes
/// the base of the returned page.
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::UserAgentConfig;
/// use catalog_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "CatalogCrawler".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(20)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// HTTP page fetcher
///
/// # Politeness
///
/// Request starts are spaced at least `request_delay` apart, including retries
/// and concurrent detail fetches.
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Parse and return the page |
/// | HTTP 4xx | Fail immediately |
/// | HTTP 5xx | Retry up to `max_retries` times, `retry_delay` apart |
/// | Timeout | Retry up to `max_retries` times, `retry_delay` apart |
/// | Connection refused | Fail immediately |
pub struct HttpFetcher {
    client: Client,
    request_delay: Duration,
    max_retries: u32,
    retry_delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new(client: Client, request_delay: Duration) -> Self {
        Self {
            client,
            request_delay,
            max_retries: 0,
            retry_delay: Duration::ZERO,
            next_slot: Mutex::new(None),
        }
    }

    /// Builds a fetcher from the crawler and user agent configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, Duration::from_secs(crawler.timeout_secs))?;
        Ok(Self::new(client, Duration::from_millis(crawler.request_delay_ms))
            .with_retries(crawler.max_retries, Duration::from_millis(crawler.retry_delay_ms)))
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Waits until this request may start and reserves the next slot
    async fn wait_for_slot(&self) {
        let start = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.request_delay);
            start
        };
        tokio::time::sleep_until(start).await;
    }

    /// Performs a single GET and returns the final URL and body
    async fn get_once(&self, url: &Url) -> Result<(Url, String), FetchFailure> {
        self.wait_for_slot().await;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Body
            }
        })?;

        Ok((final_url, body))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let mut attempt = 0;
        loop {
            match self.get_once(url).await {
                Ok((final_url, body)) => {
                    if final_url != *url {
                        tracing::debug!("{} redirected to {}", url, final_url);
                    }
                    return Ok(Page::parse(final_url, &body));
                }
                Err(kind) if kind.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Fetching {} failed ({}), retry {}/{}",
                        url,
                        kind,
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(kind) => {
                    return Err(FetchError {
                        url: url.to_string(),
                        kind,
                    })
                }
            }
        }
    }
}

/// Classifies a transport error
fn classify_error(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect
    } else {
        FetchFailure::Transport(e.to_string())
    }
}
