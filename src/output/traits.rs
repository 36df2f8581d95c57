//! Output writer traits and error types
//!
//! This module defines the interface every result-set writer implements and the
//! errors they report.

use crate::catalog::ResultSet;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A destination for a completed result set
///
/// Writers only ever receive complete result sets; a failed walk never reaches
/// them.
pub trait ResultWriter {
    /// Short description of the destination, for logs
    fn destination(&self) -> String;

    /// Writes every item, in result-set order
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn write(&mut self, items: &ResultSet) -> OutputResult<usize>;
}

/// Writes `items` to every writer in turn, stopping at the first failure
pub fn write_all(writers: &mut [Box<dyn ResultWriter>], items: &ResultSet) -> OutputResult<()> {
    for writer in writers.iter_mut() {
        let rows = writer.write(items)?;
        tracing::info!("Saved {} rows to {}", rows, writer.destination());
    }
    Ok(())
}
