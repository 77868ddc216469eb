//! CSV row loading
//!
//! Rows are read without a header, cells are trimmed, and rows may differ
//! in width. Quoting and escaping follow the `csv` crate.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::record::SourceRow;
use crate::utils::error::{TreeError, TreeResult};

/// Options for reading CSV rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Field delimiter
    /// Default: `b','`
    pub delimiter: u8,

    /// Trim surrounding whitespace from every cell
    /// Default: true
    pub trim: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl ReaderOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a user-supplied delimiter.
    ///
    /// Accepts exactly one ASCII character; the quote character and line
    /// terminators are rejected since the reader gives them other meanings.
    pub fn parse_delimiter(text: &str) -> TreeResult<u8> {
        match text.as_bytes() {
            [byte] if byte.is_ascii() && !matches!(byte, b'"' | b'\r' | b'\n') => Ok(*byte),
            _ => Err(TreeError::InvalidDelimiter {
                delimiter: text.to_string(),
            }),
        }
    }

    fn builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}

/// Maps byte offsets to 1-indexed line numbers, scanning forward only
struct LineCounter<'a> {
    input: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
        }
    }

    /// Line of the first byte at or after `byte` that is not a line
    /// terminator. The csv reader reports a record's position before it
    /// skips blank lines, so those are stepped over here.
    fn record_line(&mut self, byte: usize) -> usize {
        let byte = byte.clamp(self.offset, self.input.len());
        let start = self.input[byte..]
            .iter()
            .position(|b| !matches!(b, b'\r' | b'\n'))
            .map_or(self.input.len(), |skip| byte + skip);
        self.line += self.input[self.offset..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = start;
        self.line
    }
}

/// Read every row from in-memory CSV bytes, in order
pub fn read_rows_from_bytes(input: &[u8], options: &ReaderOptions) -> TreeResult<Vec<SourceRow>> {
    let mut reader = options.builder().from_reader(input);
    let mut lines = LineCounter::new(input);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let byte = record.position().map_or(0, |p| p.byte() as usize);
        rows.push(SourceRow {
            line: lines.record_line(byte),
            cells: record.iter().map(String::from).collect(),
        });
    }
    debug!(rows = rows.len(), "read csv rows");
    Ok(rows)
}

/// Read every row from a CSV source, in order
pub fn read_rows<R: Read>(mut source: R, options: &ReaderOptions) -> TreeResult<Vec<SourceRow>> {
    let mut input = Vec::new();
    source.read_to_end(&mut input)?;
    read_rows_from_bytes(&input, options)
}

/// Read rows from CSV text
pub fn read_rows_from_str(input: &str, options: &ReaderOptions) -> TreeResult<Vec<SourceRow>> {
    read_rows_from_bytes(input.as_bytes(), options)
}

/// Read rows from a CSV file
pub fn read_rows_from_path<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> TreeResult<Vec<SourceRow>> {
    let input = std::fs::read(path.as_ref())?;
    read_rows_from_bytes(&input, options)
}
