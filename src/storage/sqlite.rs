//! SQLite storage implementation

use crate::catalog::{CatalogItem, ResultSet};
use crate::storage::schema::{initialize_schema, quote_identifier, replace_item_table_sql};
use crate::storage::{NewRun, RunRecord, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use url::Url;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database at `path`, creating its directory if needed
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Replaces the contents of `table` with `items`, in order
    ///
    /// The table is dropped and recreated in a single transaction, so readers
    /// see either the previous export or the new one.
    pub fn replace_items(&mut self, table: &str, items: &ResultSet) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&replace_item_table_sql(table))?;

        {
            let mut stmt = tx.prepare(&format!(
                r#"INSERT INTO {} ("Title", "Price", "Rating", "Availability", "DetailURL", "Identifier", "Category")
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
                quote_identifier(table)
            ))?;

            for item in items {
                stmt.execute(params![
                    item.title,
                    item.price,
                    item.rating,
                    item.availability,
                    item.detail_url.as_str(),
                    item.identifier,
                    item.category,
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!("Wrote {} rows to table {}", items.len(), table);
        Ok(items.len())
    }

    /// Reads `table` back in insertion order
    pub fn load_items(&self, table: &str) -> StorageResult<ResultSet> {
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT rowid, "Title", "Price", "Rating", "Availability", "DetailURL", "Identifier", "Category"
               FROM {} ORDER BY rowid"#,
            quote_identifier(table)
        ))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<u8>>(3)?,
                    row.get::<_, Option<u32>>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(rowid, title, price, rating, availability, detail_url, identifier, category)| {
                    let detail_url = Url::parse(&detail_url).map_err(|e| StorageError::Corrupt {
                        table: table.to_string(),
                        row: rowid,
                        message: format!("invalid DetailURL {:?}: {}", detail_url, e),
                    })?;
                    Ok(CatalogItem {
                        title,
                        price,
                        rating,
                        availability,
                        detail_url,
                        identifier,
                        category,
                    })
                },
            )
            .collect()
    }

    /// Returns true if `table` exists
    pub fn table_exists(&self, table: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Appends an export to the run log
    pub fn record_run(&mut self, run: &NewRun) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO crawl_runs (start_url, started_at, finished_at, config_hash, table_name, item_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run.start_url,
                run.started_at.to_rfc3339(),
                run.finished_at.to_rfc3339(),
                run.config_hash,
                run.table_name,
                run.item_count as i64,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Gets the most recent export
    pub fn latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, start_url, started_at, finished_at, config_hash, table_name, item_count
                 FROM crawl_runs ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, i64>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, start_url, started_at, finished_at, config_hash, table_name, item_count)) =
            row
        else {
            return Ok(None);
        };

        Ok(Some(RunRecord {
            id,
            start_url,
            started_at: parse_timestamp(id, &started_at)?,
            finished_at: parse_timestamp(id, &finished_at)?,
            config_hash,
            table_name,
            item_count: item_count.max(0) as usize,
        }))
    }
}

fn parse_timestamp(row: i64, value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt {
            table: "crawl_runs".to_string(),
            row,
            message: format!("invalid timestamp {:?}: {}", value, e),
        })
}
