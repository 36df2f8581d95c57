//! Shared helpers for integration tests
//!
//! `FixtureFetcher` serves canned HTML by URL and records every access, so walks
//! can be checked for order and request count without a network.

#![allow(dead_code)]

use catalog_crawler::crawler::{Page, PageFetcher};
use catalog_crawler::{FetchError, FetchFailure};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// In-memory page source keyed by absolute URL
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    log: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Holds the response for `url` back by `delay`
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs whose fetch has finished, in completion order
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// URLs fetched so far, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        self.log.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delays.get(url.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(html) => Ok(Page::parse(url.clone(), html)),
            None => Err(FetchError {
                url: url.to_string(),
                kind: FetchFailure::Status(404),
            }),
        }
    }
}

/// One listing card
pub fn card(title: &str, href: &str, price: &str, rating: &str, stock: &str) -> String {
    format!(
        r#"<article class="product_pod">
            <div class="image_container"><a href="{href}"><img src="x.jpg" alt="{title}"></a></div>
            <p class="star-rating {rating}"><i class="icon-star"></i></p>
            <h3><a href="{href}" title="{title}">{title}</a></h3>
            <div class="product_price">
                <p class="price_color">{price}</p>
                <p class="instock availability"><i class="icon-ok"></i> {stock}</p>
            </div>
        </article>"#
    )
}

/// A listing page wrapping `cards`, with an optional "next" link
pub fn listing(cards: &[String], next: Option<&str>) -> String {
    let pager = match next {
        Some(href) => format!(r#"<ul class="pager"><li class="next"><a href="{href}">next</a></li></ul>"#),
        None => String::new(),
    };
    format!(
        r#"<html><body><section><ol class="row">{}</ol>{}</section></body></html>"#,
        cards
            .iter()
            .map(|c| format!("<li>{}</li>", c))
            .collect::<String>(),
        pager
    )
}

/// A detail page with an attributes table and a full breadcrumb
pub fn detail(upc: &str, category: &str, title: &str) -> String {
    format!(
        r#"<html><body>
            <ul class="breadcrumb">
                <li><a href="../../index.html">Home</a></li>
                <li><a href="../category/books_1/index.html">Books</a></li>
                <li><a href="../category/books/x/index.html">{category}</a></li>
                <li class="active">{title}</li>
            </ul>
            <table class="table table-striped">
                <tr><th>UPC</th><td>{upc}</td></tr>
                <tr><th>Product Type</th><td>Books</td></tr>
            </table>
        </body></html>"#
    )
}

/// A detail page with neither attributes table nor category crumb
pub fn bare_detail() -> String {
    r#"<html><body><ul class="breadcrumb"><li><a href="../../index.html">Home</a></li></ul></body></html>"#
        .to_string()
}
