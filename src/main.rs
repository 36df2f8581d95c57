//! Catalog Crawler main entry point
//!
//! This is the command-line interface for the catalog crawler.

use anyhow::{bail, Context};
use catalog_crawler::config::{load_config_with_hash, Config};
use catalog_crawler::crawler::{CrawlWalker, HttpFetcher};
use catalog_crawler::output::{
    print_summary, write_all, CatalogSummary, CsvOutput, ResultWriter, RunContext, SqliteOutput,
};
use catalog_crawler::storage::SqliteStore;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Catalog Crawler: a paginated product-catalog scraper
///
/// Walks every listing page of a catalog, follows each item's detail page, and
/// exports the normalized records to CSV and SQLite.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version)]
#[command(about = "A paginated product-catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the last export and its summary from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled and written
fn handle_dry_run(config: &Config) {
    println!("=== Catalog Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!(
        "  Retries: {} ({}ms apart)",
        config.crawler.max_retries, config.crawler.retry_delay_ms
    );
    println!("  Detail concurrency: {}", config.crawler.detail_concurrency);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!(
        "  Database: {} (table {})",
        config.output.database_path, config.output.table_name
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the last export from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.database_path);
    if !path.exists() {
        bail!("Database {} does not exist; run a crawl first", path.display());
    }

    println!("Database: {}\n", path.display());
    let store = SqliteStore::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    match store.latest_run()? {
        Some(run) => {
            println!("Last export: run {}", run.id);
            println!("  Start URL: {}", run.start_url);
            println!("  Finished: {}", run.finished_at.to_rfc3339());
            println!("  Duration: {}s", run.duration_seconds());
            println!("  Items: {} (table {})", run.item_count, run.table_name);
            println!("  Config hash: {}", run.config_hash);
            println!();
        }
        None => println!("No exports recorded\n"),
    }

    let table = &config.output.table_name;
    if !store.table_exists(table)? {
        bail!("Table {} does not exist in {}", table, path.display());
    }
    let items = store.load_items(table)?;
    print_summary(&CatalogSummary::from_items(&items));

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: String) -> anyhow::Result<()> {
    let start_url = Url::parse(&config.crawler.start_url)
        .with_context(|| format!("Invalid start URL {}", config.crawler.start_url))?;
    let started_at = chrono::Utc::now();

    let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)
        .context("Failed to build HTTP client")?;
    let mut walker = CrawlWalker::new(fetcher, start_url)
        .with_detail_concurrency(config.crawler.detail_concurrency);

    let outcome = walker.walk().await;
    let items = match outcome {
        Ok(items) => {
            let stats = walker.stats();
            tracing::info!(
                "Crawl completed successfully: {} items, {} listing pages, {} detail pages",
                items.len(),
                stats.list_pages,
                stats.detail_pages
            );
            items
        }
        Err(e) => {
            tracing::error!("Crawl failed in state {}: {}", walker.state(), e);
            return Err(e.into());
        }
    };

    let store = SqliteStore::open(Path::new(&config.output.database_path))
        .with_context(|| format!("Failed to open database {}", config.output.database_path))?;
    let mut writers: Vec<Box<dyn ResultWriter>> = vec![
        Box::new(CsvOutput::new(&config.output.csv_path)),
        Box::new(SqliteOutput::new(
            store,
            config.output.table_name.clone(),
            RunContext {
                start_url: config.crawler.start_url.clone(),
                config_hash,
                started_at,
            },
        )),
    ];
    write_all(&mut writers, &items).context("Failed to save results")?;

    println!();
    print_summary(&CatalogSummary::from_items(&items));

    Ok(())
}
