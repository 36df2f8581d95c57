//! Integration tests for exporting a walked catalog
//!
//! A fixture walk feeds the CSV and SQLite writers; the files they produce are
//! read back from a temporary directory.

mod common;

use catalog_crawler::config::parse_config;
use catalog_crawler::crawler::walk_catalog;
use catalog_crawler::output::{write_all, CsvOutput, ResultWriter, RunContext, SqliteOutput};
use catalog_crawler::storage::SqliteStore;
use common::{card, detail, listing, FixtureFetcher};
use tempfile::TempDir;
use url::Url;

const PAGE_1: &str = "http://example.com/catalogue/page-1.html";

fn catalog() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_page(
            PAGE_1,
            listing(
                &[
                    card(
                        "A Light in the Attic",
                        "a-light-in-the-attic_1000/index.html",
                        "£51.77",
                        "Three",
                        "In stock (22 available)",
                    ),
                    card(
                        "Sharp Objects, a &quot;thriller&quot;",
                        "sharp-objects_997/index.html",
                        "£47.82",
                        "Zero",
                        "Out of stock",
                    ),
                ],
                None,
            ),
        )
        .with_page(
            "http://example.com/catalogue/a-light-in-the-attic_1000/index.html",
            detail("a897fe39b1053632", "Poetry", "A Light in the Attic"),
        )
        .with_page(
            "http://example.com/catalogue/sharp-objects_997/index.html",
            detail("e00eb4fd7b871a48", "Mystery", "Sharp Objects"),
        )
}

#[tokio::test]
async fn test_walk_exports_to_csv_and_sqlite() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("out").join("books.csv");
    let db_path = dir.path().join("out").join("books.db");

    let items = walk_catalog(&catalog(), Url::parse(PAGE_1).unwrap())
        .await
        .expect("walk should succeed");

    let store = SqliteStore::open(&db_path).expect("Failed to open database");
    let mut writers: Vec<Box<dyn ResultWriter>> = vec![
        Box::new(CsvOutput::new(&csv_path)),
        Box::new(SqliteOutput::new(
            store,
            "books",
            RunContext {
                start_url: PAGE_1.to_string(),
                config_hash: "abc123".to_string(),
                started_at: chrono::Utc::now(),
            },
        )),
    ];
    write_all(&mut writers, &items).expect("export should succeed");
    drop(writers);

    let csv = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title,Price,Rating,Availability,DetailURL,Identifier,Category",
            "A Light in the Attic,51.77,3,22,http://example.com/catalogue/a-light-in-the-attic_1000/index.html,a897fe39b1053632,Poetry",
            "\"Sharp Objects, a \"\"thriller\"\"\",47.82,,,http://example.com/catalogue/sharp-objects_997/index.html,e00eb4fd7b871a48,Mystery",
        ]
    );

    let store = SqliteStore::open(&db_path).expect("Failed to reopen database");
    assert_eq!(store.load_items("books").unwrap(), items);

    let run = store.latest_run().unwrap().expect("run should be recorded");
    assert_eq!(run.item_count, 2);
    assert_eq!(run.table_name, "books");
    assert_eq!(run.config_hash, "abc123");
}

#[tokio::test]
async fn test_second_export_replaces_first() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = dir.path().join("books.csv");
    let db_path = dir.path().join("books.db");

    let items = walk_catalog(&catalog(), Url::parse(PAGE_1).unwrap())
        .await
        .unwrap();

    for _ in 0..2 {
        let mut writers: Vec<Box<dyn ResultWriter>> = vec![
            Box::new(CsvOutput::new(&csv_path)),
            Box::new(SqliteOutput::new(
                SqliteStore::open(&db_path).unwrap(),
                "books",
                RunContext {
                    start_url: PAGE_1.to_string(),
                    config_hash: "abc123".to_string(),
                    started_at: chrono::Utc::now(),
                },
            )),
        ];
        write_all(&mut writers, &items).unwrap();
    }

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 3);

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(store.load_items("books").unwrap().len(), 2);
    assert_eq!(store.latest_run().unwrap().unwrap().id, 2);
}

#[test]
fn test_sample_config_parses() {
    let content = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/catalog.toml"))
        .expect("Failed to read sample config");
    let config = parse_config(&content).expect("sample config should be valid");

    assert_eq!(config.crawler.start_url, "http://books.toscrape.com/");
    assert_eq!(config.output.table_name, "books");
}
