//! HTML extractor for titles and prices
//!
//! Given one catalog page, this module yields two parallel sequences: the
//! `title` attribute of every matching link, and the text of every matching
//! price element with its currency prefix stripped. Document order is
//! preserved and nothing is deduplicated; pairing happens downstream.

use crate::config::CatalogConfig;
use crate::ConfigError;
use scraper::{Html, Selector};

/// The parallel sequences extracted from one page
///
/// The two sequences usually have equal length; an unequal count is a data
/// anomaly handled by [`crate::record::pair_records`], not an error here.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    pub titles: Vec<String>,
    pub prices: Vec<String>,
}

/// Title and price extractor with pre-parsed selectors
pub struct Extractor {
    title_selector: Selector,
    price_selector: Selector,
    currency_symbol: Option<String>,
}

impl Extractor {
    /// Creates an extractor from the catalog configuration
    ///
    /// Selector strings are parsed once here; an unparsable selector is a
    /// configuration error, caught before any page is fetched.
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            title_selector: parse_selector(&config.title_selector)?,
            price_selector: parse_selector(&config.price_selector)?,
            currency_symbol: config.currency_symbol.clone(),
        })
    }

    /// Extracts titles and prices from one page of HTML
    ///
    /// Pages without any matching elements produce empty sequences; that is
    /// "no data on this page", not a failure.
    pub fn extract(&self, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        let titles = document
            .select(&self.title_selector)
            .filter_map(|element| element.value().attr("title"))
            .map(|title| title.to_string())
            .collect();

        let prices = document
            .select(&self.price_selector)
            .map(|element| {
                let text: String = element.text().collect();
                strip_currency(&text, self.currency_symbol.as_deref())
            })
            .collect();

        ExtractedPage { titles, prices }
    }
}

/// Parses a selector string into a `Selector`, mapping the error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Strips the currency prefix from a price string
///
/// With a configured symbol, the prefix is removed only when present, so a
/// multi-character symbol (e.g. "kr ") or an already-bare number both come
/// out right. Without one, exactly the first Unicode scalar is removed,
/// which handles "£51.77" and any other single-symbol currency without
/// splitting a multi-byte character.
fn strip_currency(text: &str, symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) => match text.strip_prefix(symbol) {
            Some(rest) => rest.to_string(),
            None => text.to_string(),
        },
        None => {
            let mut chars = text.chars();
            chars.next();
            chars.as_str().to_string()
        }
    }
}
