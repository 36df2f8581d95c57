//! Catalog Crawler: a paginated product-catalog scraper
//!
//! This crate walks a paginated catalog listing, follows each item's detail page,
//! and produces an ordered, normalized result set that can be exported to CSV and
//! SQLite.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for catalog crawls
///
/// Every variant aborts the walk that produced it. Variants raised by the core
/// carry the URL being processed so a failed crawl can be located.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse {field} on {url}: {source}")]
    Parse {
        url: String,
        field: &'static str,
        source: crawler::FieldError,
    },

    #[error("Cannot resolve {href:?} against {base}: {source}")]
    Resolution {
        base: String,
        href: String,
        source: ::url::ParseError,
    },

    #[error("Item {index} on {url} is missing its {element}")]
    MalformedItem {
        url: String,
        index: usize,
        element: &'static str,
    },

    #[error("Invalid walk transition: {from} -> {to}")]
    InvalidTransition {
        from: state::WalkState,
        to: state::WalkState,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed page fetch
#[derive(Debug, Error)]
#[error("Fetch failed for {url}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub kind: FetchFailure,
}

/// Classification of a fetch failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed")]
    Connect,

    #[error("failed to read response body")]
    Body,

    #[error("{0}")]
    Transport(String),
}

impl FetchFailure {
    /// Returns true if a retry of the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status(code) => *code >= 500,
            Self::Timeout => true,
            _ => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CatalogItem, ResultSet};
pub use config::Config;
pub use crawler::{CrawlWalker, HttpFetcher, Page, PageFetcher};
pub use state::WalkState;
pub use crate::url::resolve;
