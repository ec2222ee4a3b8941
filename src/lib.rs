//! Shelf-Scrape: a paginated book-catalog scraper
//!
//! This crate crawls a paginated product catalog, extracts `{title, price}`
//! records from each page, and appends them to a CSV file and/or an SQLite
//! database. A failure on one page never aborts the crawl of the others.

pub mod config;
pub mod crawler;
pub mod record;
pub mod sink;

use thiserror::Error;

/// Main error type for Shelf-Scrape operations
///
/// Only startup failures surface through this type: a bad configuration,
/// an unreachable landing page, an unresolvable page range, or a sink that
/// cannot be constructed. Per-page fetch, extraction, and persistence
/// failures are handled (and logged) at the page boundary instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch landing page {url}: {source}")]
    Landing {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Page range error: {0}")]
    Range(#[from] crawler::RangeError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Shelf-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, FetchError, Orchestrator, PageRange, RangeError};
pub use record::{pair_records, BookRecord, CountMismatch, MismatchSide};
pub use sink::{RecordSink, SinkError};
