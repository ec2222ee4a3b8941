//! SQLite record sink
//!
//! Batched relational persistence: one parameterized multi-row INSERT per
//! page's batch of records, committed as a transaction. The connection is
//! opened once at construction and lives for the run.

use crate::record::BookRecord;
use crate::sink::traits::{RecordSink, SinkError, SinkResult};
use chrono::Utc;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

/// SQL schema for the books table
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    price TEXT NOT NULL,
    scraped_at TEXT NOT NULL
);
";

/// Sink appending records to a SQLite database
pub struct SqliteSink {
    conn: Connection,
    target: String,
}

impl SqliteSink {
    /// Opens (or creates) the database and initializes the schema
    ///
    /// Connection parameters come from the configuration layer, loaded once
    /// at startup and passed in here; nothing is re-read mid-crawl.
    pub fn new(path: &Path) -> SinkResult<Self> {
        let conn =
            Connection::open(path).map_err(|e| SinkError::Connection(e.to_string()))?;

        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| SinkError::Connection(e.to_string()))?;

        Ok(Self {
            conn,
            target: path.display().to_string(),
        })
    }

    /// Opens an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> SinkResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| SinkError::Connection(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| SinkError::Connection(e.to_string()))?;
        Ok(Self {
            conn,
            target: ":memory:".to_string(),
        })
    }

    /// Number of rows currently in the books table
    pub fn count_rows(&self) -> SinkResult<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
            .map_err(|e| SinkError::Insert(e.to_string()))
    }
}

impl RecordSink for SqliteSink {
    fn append(&mut self, records: &[BookRecord]) -> SinkResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let scraped_at = Utc::now().to_rfc3339();

        // One multi-row statement for the whole batch
        let placeholders: Vec<&str> = records.iter().map(|_| "(?, ?, ?)").collect();
        let sql = format!(
            "INSERT INTO books (title, price, scraped_at) VALUES {}",
            placeholders.join(", ")
        );

        let values = records.iter().flat_map(|record| {
            [
                record.title.as_str(),
                record.price.as_str(),
                scraped_at.as_str(),
            ]
        });

        let tx = self
            .conn
            .transaction()
            .map_err(|e| SinkError::Insert(e.to_string()))?;
        let inserted = tx
            .execute(&sql, params_from_iter(values))
            .map_err(|e| SinkError::Insert(e.to_string()))?;
        tx.commit().map_err(|e| SinkError::Insert(e.to_string()))?;

        Ok(inserted)
    }

    fn describe(&self) -> String {
        format!("sqlite database {}", self.target)
    }
}
