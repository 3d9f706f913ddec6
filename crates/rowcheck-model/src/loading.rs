// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Row set loader for delimiter-separated text.
//!
//! `RowSetLoader` turns a line-oriented text stream into a `RowSet`. Every
//! line becomes one row and is split on a single-character delimiter
//! (comma by default). Cells are kept verbatim apart from the line terminator
//! (`\n` or `\r\n`), because judging them is the validator's job, not the
//! tokenizer's. In particular a blank line is a row with one empty cell unless
//! `skip_blank_lines` is enabled.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.

use crate::rows::{RowSet, RowSetBuilder};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// The error type for the loading process.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A line was not valid UTF-8. `line` is 0-based, matching row indices.
    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// A configurable loader for delimiter-separated rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSetLoader {
    delimiter: char,
    skip_blank_lines: bool,
}

impl Default for RowSetLoader {
    fn default() -> Self {
        Self {
            delimiter: ',',
            skip_blank_lines: false,
        }
    }
}

impl RowSetLoader {
    /// Creates a new `RowSetLoader` splitting on `,` and keeping blank lines.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell delimiter.
    #[inline]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Configures whether lines that are empty after stripping the line
    /// terminator are dropped instead of becoming single-cell rows.
    #[inline]
    pub fn skip_blank_lines(mut self, yes: bool) -> Self {
        self.skip_blank_lines = yes;
        self
    }

    /// Loads rows from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, mut rdr: R) -> Result<RowSet, LoadError> {
        let mut builder = RowSetBuilder::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            if rdr.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = std::str::from_utf8(&buf)
                .map_err(|_| LoadError::InvalidUtf8 { line: line_no })?;
            let line = strip_line_terminator(line);
            line_no += 1;

            if self.skip_blank_lines && line.is_empty() {
                continue;
            }

            builder.push_row(line.split(self.delimiter));
        }

        Ok(builder.build())
    }

    /// Loads rows from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<RowSet, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads rows from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<RowSet, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads rows from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<RowSet, LoadError> {
        self.from_bufread(s.as_bytes())
    }
}

#[inline]
fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RowIndex;

    fn cells(rows: &RowSet, i: usize) -> Vec<String> {
        rows.row(RowIndex::new(i)).cells().to_vec()
    }

    #[test]
    fn test_splits_lines_on_commas() {
        let rows = RowSetLoader::new().from_str("1,2\n3,x\n5,6,7\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(cells(&rows, 0), vec!["1", "2"]);
        assert_eq!(cells(&rows, 1), vec!["3", "x"]);
        assert_eq!(cells(&rows, 2), vec!["5", "6", "7"]);
    }

    #[test]
    fn test_last_line_without_newline_is_a_row() {
        let rows = RowSetLoader::new().from_str("1,2\n3,4").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows, 1), vec!["3", "4"]);
    }

    #[test]
    fn test_crlf_is_stripped() {
        let rows = RowSetLoader::new().from_str("1,2\r\n3,4\r\n").unwrap();
        assert_eq!(cells(&rows, 0), vec!["1", "2"]);
        assert_eq!(cells(&rows, 1), vec!["3", "4"]);
    }

    #[test]
    fn test_cells_are_not_trimmed() {
        let rows = RowSetLoader::new().from_str(" 1,2 \n").unwrap();
        assert_eq!(cells(&rows, 0), vec![" 1", "2 "]);
    }

    #[test]
    fn test_blank_lines_are_rows_by_default() {
        let rows = RowSetLoader::new().from_str("1,2\n\n3,4\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(cells(&rows, 1), vec![""]);
    }

    #[test]
    fn test_skip_blank_lines() {
        let rows = RowSetLoader::new()
            .skip_blank_lines(true)
            .from_str("1,2\n\n\r\n3,4\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows, 1), vec!["3", "4"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = RowSetLoader::new()
            .delimiter(';')
            .from_str("1;2,5;3\n")
            .unwrap();
        assert_eq!(cells(&rows, 0), vec!["1", "2,5", "3"]);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let rows = RowSetLoader::new().from_str("").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let input: &[u8] = b"1,2\n\xff,3\n";
        match RowSetLoader::new().from_bufread(input) {
            Err(LoadError::InvalidUtf8 { line }) => assert_eq!(line, 1),
            other => panic!("expected InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RowSetLoader::new()
            .from_path("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
