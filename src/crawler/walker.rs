//! Crawl walker - pagination state machine
//!
//! The walker drives one forward pass over a paginated catalog:
//! - fetch a listing page and extract its cards
//! - fetch every card's detail page, then enrich the page's cards in one batch,
//!   keeping document order
//! - follow the listing page's "next" link, resolved against that page
//! - stop when a listing page has no "next" link
//!
//! Any failure aborts the walk and is returned unchanged. The walker performs no
//! I/O of its own beyond the injected fetcher.

use crate::catalog::{DetailFields, PartialItem, ResultSet};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{extract_detail, extract_items, extract_next_href};
use crate::state::WalkState;
use crate::url::resolve;
use crate::CrawlError;
use futures::stream::{self, StreamExt, TryStreamExt};
use url::Url;

/// Counters describing a finished walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub list_pages: usize,
    pub detail_pages: usize,
}

/// Walks a paginated catalog from a start URL
pub struct CrawlWalker<F> {
    fetcher: F,
    start_url: Url,
    detail_concurrency: usize,
    state: WalkState,
    stats: WalkStats,
}

impl<F: PageFetcher> CrawlWalker<F> {
    /// Creates a walker that fetches detail pages one at a time
    pub fn new(fetcher: F, start_url: Url) -> Self {
        Self {
            fetcher,
            start_url,
            detail_concurrency: 1,
            state: WalkState::FetchingList,
            stats: WalkStats::default(),
        }
    }

    /// Allows up to `concurrency` detail fetches in flight within one listing page
    ///
    /// Results are still appended in document order.
    pub fn with_detail_concurrency(mut self, concurrency: usize) -> Self {
        self.detail_concurrency = concurrency.max(1);
        self
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Runs the walk to completion
    ///
    /// # Returns
    ///
    /// * `Ok(ResultSet)` - every item of every listing page, in discovery order
    /// * `Err(CrawlError)` - the first fetch, parse, resolution, or malformed-item
    ///   failure; no partial result is returned
    pub async fn walk(&mut self) -> Result<ResultSet, CrawlError> {
        self.state = WalkState::FetchingList;
        self.stats = WalkStats::default();

        let mut results = ResultSet::new();
        let mut list_url = self.start_url.clone();

        tracing::info!("Starting catalog walk at {}", list_url);

        loop {
            let page = self.fetcher.fetch(&list_url).await?;
            self.stats.list_pages += 1;

            self.transition(WalkState::ExtractingItems)?;
            let items = extract_items(&page)?;
            let next_href = extract_next_href(&page);
            // Links found on this page resolve against the URL it was served from
            let page_url = page.url().clone();
            drop(page);

            tracing::info!(
                "Listing page {} ({}): {} items",
                self.stats.list_pages,
                page_url,
                items.len()
            );

            if !items.is_empty() {
                self.transition(WalkState::FetchingDetail)?;
                let details = self.fetch_details(&items).await?;

                self.transition(WalkState::Enriching)?;
                for (partial, detail) in items.into_iter().zip(details) {
                    tracing::debug!("Completed {:?} ({})", partial.title, partial.detail_url);
                    results.push(partial.complete(detail));
                }
            }

            match next_href {
                Some(href) => {
                    list_url = resolve(&page_url, &href)?;
                    self.transition(WalkState::FetchingList)?;
                }
                None => {
                    self.transition(WalkState::Done)?;
                    break;
                }
            }
        }

        tracing::info!(
            "Catalog walk complete: {} items from {} listing pages",
            results.len(),
            self.stats.list_pages
        );

        Ok(results)
    }

    /// Fetches and enriches the detail page of every partial item, in order
    async fn fetch_details(&mut self, items: &[PartialItem]) -> Result<Vec<DetailFields>, CrawlError> {
        let fetcher = &self.fetcher;
        let details: Vec<DetailFields> = stream::iter(items)
            .map(|item| async move {
                tracing::debug!("Fetching detail page {}", item.detail_url);
                let page = fetcher.fetch(&item.detail_url).await?;
                Ok::<_, CrawlError>(extract_detail(&page))
            })
            .buffered(self.detail_concurrency)
            .try_collect()
            .await?;

        self.stats.detail_pages += details.len();
        Ok(details)
    }

    fn transition(&mut self, next: WalkState) -> Result<(), CrawlError> {
        if !self.state.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Walk state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

/// Walks the catalog starting at `start_url` with the given fetcher
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::load_config;
/// use catalog_crawler::crawler::{walk_catalog, HttpFetcher};
/// use std::path::Path;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("catalog.toml"))?;
/// let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
/// let items = walk_catalog(fetcher, Url::parse(&config.crawler.start_url)?).await?;
/// println!("{} items", items.len());
/// # Ok(())
/// # }
/// ```
pub async fn walk_catalog<F: PageFetcher>(fetcher: F, start_url: Url) -> Result<ResultSet, CrawlError> {
    CrawlWalker::new(fetcher, start_url).walk().await
}
