//! Record types and title/price pairing
//!
//! Extraction yields two parallel sequences per page. This module pairs them
//! into records and accounts for any surplus on either side.

use std::fmt;

/// One scraped catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Title text, taken verbatim from the source
    pub title: String,

    /// Price as a decimal string with the currency symbol already stripped
    pub price: String,
}

impl BookRecord {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
        }
    }
}

/// Which side of the pairing had unmatched entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchSide {
    Titles,
    Prices,
}

impl fmt::Display for MismatchSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchSide::Titles => write!(f, "titles"),
            MismatchSide::Prices => write!(f, "prices"),
        }
    }
}

/// A count mismatch between extracted titles and prices on one page
///
/// This is a data anomaly, never a fatal condition: paired records are still
/// persisted, and the surplus is reported by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    /// The side that had more entries
    pub side: MismatchSide,

    /// How many entries on that side had no counterpart
    pub surplus: usize,
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unmatched {}", self.surplus, self.side)
    }
}

/// Pairs titles with prices in document order
///
/// Records are emitted for the overlapping prefix only. A surplus on either
/// side is returned as a [`CountMismatch`] so the caller can report it; it is
/// never silently dropped and never guessed into a record.
///
/// # Example
///
/// ```
/// use shelf_scrape::record::{pair_records, MismatchSide};
///
/// let titles = vec!["A Light in the Attic".to_string(), "Sapiens".to_string()];
/// let prices = vec!["51.77".to_string()];
/// let (records, mismatch) = pair_records(titles, prices);
///
/// assert_eq!(records.len(), 1);
/// let mismatch = mismatch.unwrap();
/// assert_eq!(mismatch.side, MismatchSide::Titles);
/// assert_eq!(mismatch.surplus, 1);
/// ```
pub fn pair_records(
    titles: Vec<String>,
    prices: Vec<String>,
) -> (Vec<BookRecord>, Option<CountMismatch>) {
    let mismatch = if titles.len() > prices.len() {
        Some(CountMismatch {
            side: MismatchSide::Titles,
            surplus: titles.len() - prices.len(),
        })
    } else if prices.len() > titles.len() {
        Some(CountMismatch {
            side: MismatchSide::Prices,
            surplus: prices.len() - titles.len(),
        })
    } else {
        None
    };

    let records = titles
        .into_iter()
        .zip(prices)
        .map(|(title, price)| BookRecord { title, price })
        .collect();

    (records, mismatch)
}
