//! Page range resolution
//!
//! The catalog's landing page carries a pagination indicator of the shape
//! "Page 1 of 50". This module parses it into the inclusive bounds the
//! orchestrator iterates. A range can also be supplied directly from
//! configuration, bypassing the landing page entirely.

use scraper::{Html, Selector};
use thiserror::Error;

/// Errors while resolving the page range
///
/// Both variants are fatal at startup: without a range there is no crawl.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("Pagination indicator element not found on landing page")]
    MissingIndicator,

    #[error("Malformed pagination indicator text: '{0}'")]
    MalformedText(String),
}

/// Inclusive 1-based page bounds, immutable for the crawl's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    first: u32,
    last: u32,
}

impl PageRange {
    /// Creates a range, rejecting `first < 1` and `last < first`
    pub fn new(first: u32, last: u32) -> Result<Self, RangeError> {
        if first < 1 || last < first {
            return Err(RangeError::MalformedText(format!(
                "invalid bounds {}..{}",
                first, last
            )));
        }
        Ok(Self { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of pages in the range
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    pub fn is_empty(&self) -> bool {
        false // first <= last holds by construction
    }

    /// Iterates the page indices in increasing order, each exactly once
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// Resolves the page range from the landing page HTML
///
/// Locates the indicator element, whitespace-normalizes its text, and parses
/// the 2nd and 4th tokens as the first and last page ("Page 1 of 50").
///
/// # Arguments
///
/// * `html` - The landing page HTML
/// * `indicator_selector` - Selector for the indicator element
pub fn resolve_page_range(
    html: &str,
    indicator_selector: &Selector,
) -> Result<PageRange, RangeError> {
    let document = Html::parse_document(html);

    let element = document
        .select(indicator_selector)
        .next()
        .ok_or(RangeError::MissingIndicator)?;

    let text: String = element.text().collect();
    let text = text.trim();
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let first = tokens
        .get(1)
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or_else(|| RangeError::MalformedText(text.to_string()))?;
    let last = tokens
        .get(3)
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or_else(|| RangeError::MalformedText(text.to_string()))?;

    PageRange::new(first, last)
}
