//! Output module for exporting result sets
//!
//! This module handles:
//! - Writing result sets to CSV files
//! - Writing result sets to SQLite tables
//! - Summarizing result sets for the console

mod csv_output;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::{write_csv, write_csv_to, CsvOutput};
pub use sqlite_output::{RunContext, SqliteOutput};
pub use stats::{print_summary, CatalogSummary, RatingPrice};
pub use traits::{write_all, OutputError, OutputResult, ResultWriter};
