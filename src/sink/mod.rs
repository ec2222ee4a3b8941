//! Persistence sinks for scraped records
//!
//! Two append-only implementations of the [`RecordSink`] trait:
//!
//! - [`CsvSink`]: comma-delimited file, header written once
//! - [`SqliteSink`]: batched multi-row inserts into a SQLite database
//!
//! Sink failures at crawl time are page-local: the batch is lost and the
//! crawl continues.

mod csv;
mod sqlite;
mod traits;

pub use csv::{read_rows, CsvSink};
pub use sqlite::SqliteSink;
pub use traits::{RecordSink, SinkError, SinkResult};

use crate::config::OutputConfig;
use std::path::Path;

/// Builds the configured sinks
///
/// Each configured output target becomes one sink. Construction failure
/// (e.g. an unopenable database) is fatal: there is no point crawling when
/// nothing can be persisted.
pub fn build_sinks(config: &OutputConfig) -> SinkResult<Vec<Box<dyn RecordSink>>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();

    if let Some(path) = &config.csv_path {
        sinks.push(Box::new(CsvSink::new(path)));
    }

    if let Some(path) = &config.database_path {
        sinks.push(Box::new(SqliteSink::new(Path::new(path))?));
    }

    Ok(sinks)
}
