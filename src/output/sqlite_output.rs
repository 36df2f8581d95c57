//! SQLite-based output writer
//!
//! Replaces the configured item table and appends the export to the run log.

use crate::catalog::ResultSet;
use crate::output::traits::{OutputResult, ResultWriter};
use crate::storage::{NewRun, SqliteStore};
use chrono::{DateTime, Utc};

/// What the run log records about the crawl behind an export
#[derive(Debug, Clone)]
pub struct RunContext {
    pub start_url: String,
    pub config_hash: String,
    pub started_at: DateTime<Utc>,
}

/// SQLite output writer
pub struct SqliteOutput {
    store: SqliteStore,
    table: String,
    run: RunContext,
}

impl SqliteOutput {
    pub fn new(store: SqliteStore, table: impl Into<String>, run: RunContext) -> Self {
        Self {
            store,
            table: table.into(),
            run,
        }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }
}

impl ResultWriter for SqliteOutput {
    fn destination(&self) -> String {
        format!("SQLite table {}", self.table)
    }

    fn write(&mut self, items: &ResultSet) -> OutputResult<usize> {
        let rows = self.store.replace_items(&self.table, items)?;

        let run_id = self.store.record_run(&NewRun {
            start_url: self.run.start_url.clone(),
            started_at: self.run.started_at,
            finished_at: Utc::now(),
            config_hash: self.run.config_hash.clone(),
            table_name: self.table.clone(),
            item_count: rows,
        })?;
        tracing::debug!("Recorded export run {}", run_id);

        Ok(rows)
    }
}
