//! Database schema definitions
//!
//! The run log has a fixed schema. Item tables are named by configuration and
//! created on every export, with one column per output field.

/// SQL schema for the run log
pub const SCHEMA_SQL: &str = r#"
-- One row per successful export
CREATE TABLE IF NOT EXISTS crawl_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_url TEXT NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    table_name TEXT NOT NULL,
    item_count INTEGER NOT NULL
);
"#;

/// Initializes the run log schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Quotes an identifier for interpolation into SQL
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Drops and recreates an item table
pub fn replace_item_table_sql(table: &str) -> String {
    let table = quote_identifier(table);
    format!(
        r#"
DROP TABLE IF EXISTS {table};
CREATE TABLE {table} (
    "Title" TEXT NOT NULL,
    "Price" REAL NOT NULL CHECK ("Price" >= 0),
    "Rating" INTEGER CHECK ("Rating" BETWEEN 1 AND 5),
    "Availability" INTEGER CHECK ("Availability" >= 0),
    "DetailURL" TEXT NOT NULL,
    "Identifier" TEXT NOT NULL,
    "Category" TEXT NOT NULL
);
"#
    )
}
