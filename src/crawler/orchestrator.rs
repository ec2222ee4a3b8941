//! Crawl orchestration
//!
//! The orchestrator drives the whole pipeline: resolve the page range once,
//! then for each page index fetch, extract, pair, and persist. Each page
//! iteration is independent; a fetch failure, extraction anomaly, or sink
//! failure on one page never prevents attempting the next.

use crate::config::Config;
use crate::crawler::extractor::{parse_selector, Extractor};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::range::{resolve_page_range, PageRange};
use crate::record::{pair_records, MismatchSide};
use crate::sink::{build_sinks, RecordSink};
use crate::ScrapeError;
use reqwest::Client;
use scraper::Selector;

/// Summary of a completed crawl
///
/// `records_persisted` sums the rows written across all configured sinks,
/// so with two sinks a fully successful page counts its records twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Page indices visited (fetch attempted)
    pub pages_attempted: u32,

    /// Pages skipped because the fetch failed
    pub pages_skipped: u32,

    /// Rows written, summed over sinks
    pub records_persisted: usize,

    /// Titles that had no matching price
    pub orphaned_titles: usize,

    /// Prices that had no matching title
    pub orphaned_prices: usize,

    /// Per-page sink write failures (each one batch of lost records)
    pub sink_failures: u32,
}

/// Main crawl orchestrator
pub struct Orchestrator {
    config: Config,
    client: Client,
    extractor: Extractor,
    indicator_selector: Selector,
    sinks: Vec<Box<dyn RecordSink>>,
}

impl Orchestrator {
    /// Creates an orchestrator from a validated configuration
    ///
    /// Builds the HTTP client, the extractor, and every configured sink.
    /// Any failure here is fatal; nothing has been fetched yet.
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.http)?;
        let extractor = Extractor::new(&config.catalog)?;
        let indicator_selector = parse_selector(&config.catalog.indicator_selector)?;
        let sinks = build_sinks(&config.output)?;

        Ok(Self {
            config,
            client,
            extractor,
            indicator_selector,
            sinks,
        })
    }

    /// Runs the crawl and returns the summary report
    ///
    /// Aborts only when no page range can be established (unreachable
    /// landing page, missing or malformed pagination indicator). Everything
    /// after that point is per-page failure isolation.
    pub async fn run(&mut self) -> Result<CrawlReport, ScrapeError> {
        let range = self.resolve_range().await?;
        tracing::info!(
            "Crawling pages {} through {} ({} pages)",
            range.first(),
            range.last(),
            range.len()
        );

        let mut report = CrawlReport::default();
        let start_time = std::time::Instant::now();

        for page_number in range.iter() {
            report.pages_attempted += 1;
            let url = page_url(&self.config.catalog.page_url_template, page_number);

            let body = match fetch_page(&self.client, &url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Skipping page {}: {}", page_number, e);
                    report.pages_skipped += 1;
                    continue;
                }
            };
            tracing::debug!("Fetched page {}: {}", page_number, url);

            let extracted = self.extractor.extract(&body);
            let (records, mismatch) = pair_records(extracted.titles, extracted.prices);

            if let Some(mismatch) = mismatch {
                tracing::warn!("Count mismatch on {}: {}", url, mismatch);
                match mismatch.side {
                    MismatchSide::Titles => report.orphaned_titles += mismatch.surplus,
                    MismatchSide::Prices => report.orphaned_prices += mismatch.surplus,
                }
            }

            if records.is_empty() {
                tracing::debug!("No records on page {}", page_number);
                continue;
            }

            for sink in &mut self.sinks {
                match sink.append(&records) {
                    Ok(written) => {
                        tracing::debug!(
                            "Persisted {} records from page {} to {}",
                            written,
                            page_number,
                            sink.describe()
                        );
                        report.records_persisted += written;
                    }
                    Err(e) => {
                        tracing::error!(
                            "Lost {} records from page {} ({}): {}",
                            records.len(),
                            page_number,
                            sink.describe(),
                            e
                        );
                        report.sink_failures += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Crawl completed in {:?}: {} pages attempted, {} skipped, {} records persisted, {} sink failures",
            start_time.elapsed(),
            report.pages_attempted,
            report.pages_skipped,
            report.records_persisted,
            report.sink_failures
        );
        if report.orphaned_titles > 0 || report.orphaned_prices > 0 {
            tracing::warn!(
                "Unpaired data encountered: {} orphaned titles, {} orphaned prices",
                report.orphaned_titles,
                report.orphaned_prices
            );
        }

        Ok(report)
    }

    /// Establishes the page range: fixed bounds from configuration when
    /// present, otherwise resolved from the landing page
    async fn resolve_range(&self) -> Result<PageRange, ScrapeError> {
        if let (Some(first), Some(last)) =
            (self.config.catalog.first_page, self.config.catalog.last_page)
        {
            let range = PageRange::new(first, last)?;
            tracing::info!("Using fixed page range {}..={}", first, last);
            return Ok(range);
        }

        // Validation guarantees a landing URL when no fixed range is given
        let landing_url = self.config.catalog.landing_url.as_deref().ok_or_else(|| {
            crate::ConfigError::Validation(
                "no landing_url and no fixed page range".to_string(),
            )
        })?;

        tracing::info!("Resolving page range from landing page {}", landing_url);
        let body = fetch_page(&self.client, landing_url)
            .await
            .map_err(|source| ScrapeError::Landing {
                url: landing_url.to_string(),
                source,
            })?;

        let range = resolve_page_range(&body, &self.indicator_selector)?;
        Ok(range)
    }
}

/// Fills the page index into the URL template
fn page_url(template: &str, page: u32) -> String {
    template.replace("{page}", &page.to_string())
}

/// Runs a complete crawl with the given configuration
///
/// This is the main library entry point: it constructs an [`Orchestrator`]
/// and runs it to completion.
///
/// # Arguments
///
/// * `config` - The validated scraper configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished; per-page failures are in the report
/// * `Err(ScrapeError)` - Startup failure before any per-page work
pub async fn crawl(config: Config) -> Result<CrawlReport, ScrapeError> {
    let mut orchestrator = Orchestrator::new(config)?;
    orchestrator.run().await
}
