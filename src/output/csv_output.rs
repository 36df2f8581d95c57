//! CSV output
//!
//! Writes one header row with the output column names, then one row per item.
//! Absent ratings and stock counts become empty cells.

use crate::catalog::{CatalogItem, ResultSet};
use crate::output::traits::{OutputResult, ResultWriter};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `items` as CSV to any writer
pub fn write_csv_to<W: Write>(writer: W, items: &ResultSet) -> OutputResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Serializing structs only emits a header once a row exists
    if items.is_empty() {
        csv_writer.write_record(CatalogItem::COLUMNS)?;
    }
    for item in items {
        csv_writer.serialize(item)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `items` to a CSV file, creating its directory if needed
pub fn write_csv(path: &Path, items: &ResultSet) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv_to(std::io::BufWriter::new(file), items)
}

/// CSV file writer
pub struct CsvOutput {
    path: PathBuf,
}

impl CsvOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultWriter for CsvOutput {
    fn destination(&self) -> String {
        format!("CSV {}", self.path.display())
    }

    fn write(&mut self, items: &ResultSet) -> OutputResult<usize> {
        write_csv(&self.path, items)?;
        Ok(items.len())
    }
}
