//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core scraping pipeline:
//! - HTTP fetching with typed failure classification
//! - Title/price extraction from page HTML
//! - Page range resolution from the landing page
//! - Overall crawl orchestration with per-page failure isolation

mod extractor;
mod fetcher;
mod orchestrator;
mod range;

pub use extractor::{ExtractedPage, Extractor};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use orchestrator::{crawl, CrawlReport, Orchestrator};
pub use range::{resolve_page_range, PageRange, RangeError};
