//! CSV file sink
//!
//! Appends records to a comma-delimited file with a `Title,Price` header
//! written exactly once. The file handle is scoped to a single append call:
//! opened, written, flushed, closed. Concurrent writers to the same file are
//! not synchronized; single-writer use is a documented constraint.

use crate::record::BookRecord;
use crate::sink::traits::{RecordSink, SinkError, SinkResult};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

const HEADER: [&str; 2] = ["Title", "Price"];

/// Sink writing one CSV row per record
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the file for this one append call
    ///
    /// `create_new` makes the existence check and the creation a single
    /// atomic open, so the header is written exactly once even if the file
    /// appears between a check and the open. Returns the open file and
    /// whether this call created it.
    fn open(&self) -> SinkResult<(File, bool)> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => Ok((file, true)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|source| self.io_error(source))?;
                Ok((file, false))
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::FileIo {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, records: &[BookRecord]) -> SinkResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let (file, created) = self.open()?;
        let mut writer = BufWriter::new(file);

        if created {
            write_row(&mut writer, &HEADER).map_err(|e| self.io_error(e))?;
        }

        for record in records {
            write_row(&mut writer, &[record.title.as_str(), record.price.as_str()])
                .map_err(|e| self.io_error(e))?;
        }

        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(records.len())
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}

/// Writes one CSV row with RFC 4180 quoting
fn write_row<W: Write>(mut writer: W, fields: &[&str]) -> std::io::Result<()> {
    let mut first = true;
    for field in fields {
        if !first {
            write!(writer, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(field) {
            let escaped = field.replace('"', "\"\"");
            write!(writer, "\"{}\"", escaped)?;
        } else {
            write!(writer, "{}", field)?;
        }
    }
    writeln!(writer)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Parses CSV text back into rows (quotes and CRLF tolerant)
///
/// Used by tests to verify the write/parse round trip; handy for small
/// inspection tooling as well.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Reads a CSV file written by [`CsvSink`] back into rows
pub fn read_rows(path: &Path) -> std::io::Result<Vec<Vec<String>>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rows(&text))
}
