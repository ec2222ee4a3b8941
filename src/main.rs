//! Shelf-Scrape main entry point
//!
//! Command-line interface for the catalog scraper. All knobs live in the
//! TOML configuration file; the CLI only selects the file, the verbosity,
//! and whether to do a dry run.

use anyhow::Context;
use clap::Parser;
use shelf_scrape::config::load_config;
use shelf_scrape::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Scrape: a paginated book-catalog scraper
///
/// Crawls a paginated catalog site page by page, extracts title/price
/// records, and appends them to a CSV file and/or a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "shelf-scrape")]
#[command(version)]
#[command(about = "A paginated book-catalog scraper", long_about = None)]
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

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scrape=info,warn"),
            1 => EnvFilter::new("shelf_scrape=debug,info"),
            2 => EnvFilter::new("shelf_scrape=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &shelf_scrape::config::Config) {
    println!("=== Shelf-Scrape Dry Run ===\n");

    println!("Catalog:");
    println!("  Page URL template: {}", config.catalog.page_url_template);
    match (config.catalog.first_page, config.catalog.last_page) {
        (Some(first), Some(last)) => {
            println!("  Page range: fixed, {} through {}", first, last);
        }
        _ => {
            println!(
                "  Page range: resolved from landing page {}",
                config.catalog.landing_url.as_deref().unwrap_or("(none)")
            );
        }
    }
    println!("  Title selector: {}", config.catalog.title_selector);
    println!("  Price selector: {}", config.catalog.price_selector);
    match &config.catalog.currency_symbol {
        Some(symbol) => println!("  Currency symbol: '{}'", symbol),
        None => println!("  Currency symbol: first character of price text"),
    }

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nOutput:");
    if let Some(path) = &config.output.csv_path {
        println!("  CSV file: {}", path);
    }
    if let Some(path) = &config.output.database_path {
        println!("  SQLite database: {}", path);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: shelf_scrape::config::Config) -> anyhow::Result<()> {
    match crawl(config).await {
        Ok(report) => {
            tracing::info!(
                "Done: {}/{} pages yielded data, {} records persisted",
                report.pages_attempted - report.pages_skipped,
                report.pages_attempted,
                report.records_persisted
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
