//! Crawler module for catalog walking and extraction
//!
//! This module contains the core crawling logic, including:
//! - Field parsers for price, rating, and stock text
//! - The page fetch contract and its HTTP implementation
//! - Listing card and detail page extraction
//! - The pagination walk that ties them together

mod fetcher;
mod fields;
mod parser;
mod walker;

pub use fetcher::{build_http_client, HttpFetcher, Page, PageFetcher};
pub use fields::{parse_availability, parse_price, parse_rating, FieldError};
pub use parser::{extract_detail, extract_items, extract_next_href};
pub use walker::{walk_catalog, CrawlWalker, WalkStats};
