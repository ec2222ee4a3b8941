//! Record sink trait and error types

use crate::record::BookRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting records
///
/// All of these are page-local at crawl time: the affected batch is lost,
/// the failure is logged, and the crawl moves on to the next page. Only a
/// sink that fails to construct aborts the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("File IO error for {path}: {source}")]
    FileIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database connection failure: {0}")]
    Connection(String),

    #[error("Insert failure: {0}")]
    Insert(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Append-only persistence for scraped records
///
/// Implementations are idempotent-on-retry at the row level but not
/// exactly-once across runs: re-running a crawl appends the same rows again.
pub trait RecordSink {
    /// Appends a batch of records, returning the number written
    ///
    /// An empty batch is a no-op returning 0.
    fn append(&mut self, records: &[BookRecord]) -> SinkResult<usize>;

    /// Human-readable description of the sink target, for log messages
    fn describe(&self) -> String;
}
