//! Storage module for the relational export
//!
//! This module writes a result set to a SQLite table and reads it back:
//! - Schema management for the item table and the run log
//! - Whole-table replacement of exported items
//! - Run records tying each export to its start URL and configuration

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt row {row} in table {table}: {message}")]
    Corrupt {
        table: String,
        row: i64,
        message: String,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An export to be recorded in the run log
#[derive(Debug, Clone)]
pub struct NewRun {
    pub start_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,
    pub table_name: String,
    pub item_count: usize,
}

/// A recorded export
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub start_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,
    pub table_name: String,
    pub item_count: usize,
}

impl RunRecord {
    /// Wall-clock duration of the crawl that produced this export
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
