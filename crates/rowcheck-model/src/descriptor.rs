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

//! Error descriptors.
//!
//! A descriptor is a plain value naming one data problem found during a scan.
//! Malformed rows and cells are expected input, so they are reported through
//! these values and never through `Result::Err` or a panic.

use crate::{
    index::{ColumnIndex, RowIndex},
    rows::ColumnSize,
};
use std::cmp::Ordering;

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorDescriptor {
    /// The row does not have the expected number of cells. Cell-level checks
    /// are skipped for such a row.
    RowLengthMismatch {
        row: RowIndex,
        actual: usize,
        expected: ColumnSize,
    },
    /// A cell could not be parsed as an integer.
    CellParseFailure {
        row: RowIndex,
        column: ColumnIndex,
        text: String,
    },
}

impl ErrorDescriptor {
    /// Creates a row-length mismatch descriptor.
    #[inline]
    pub fn row_length_mismatch(row: RowIndex, actual: usize, expected: ColumnSize) -> Self {
        Self::RowLengthMismatch {
            row,
            actual,
            expected,
        }
    }

    /// Creates a cell parse failure descriptor.
    #[inline]
    pub fn cell_parse_failure<S>(row: RowIndex, column: ColumnIndex, text: S) -> Self
    where
        S: Into<String>,
    {
        Self::CellParseFailure {
            row,
            column,
            text: text.into(),
        }
    }

    /// Returns the row this descriptor refers to.
    #[inline]
    pub fn row(&self) -> RowIndex {
        match self {
            Self::RowLengthMismatch { row, .. } | Self::CellParseFailure { row, .. } => *row,
        }
    }

    /// Returns the column for cell failures, `None` for row-level failures.
    #[inline]
    pub fn column(&self) -> Option<ColumnIndex> {
        match self {
            Self::RowLengthMismatch { .. } => None,
            Self::CellParseFailure { column, .. } => Some(*column),
        }
    }

    #[inline]
    pub fn is_row_length_mismatch(&self) -> bool {
        matches!(self, Self::RowLengthMismatch { .. })
    }

    #[inline]
    pub fn is_cell_parse_failure(&self) -> bool {
        matches!(self, Self::CellParseFailure { .. })
    }

    // Row-level problems sort ahead of cell problems on the same row.
    #[inline]
    fn sort_key(&self) -> (usize, u8, usize) {
        match self {
            Self::RowLengthMismatch { row, .. } => (row.get(), 0, 0),
            Self::CellParseFailure { row, column, .. } => (row.get(), 1, column.get()),
        }
    }
}

impl PartialOrd for ErrorDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ErrorDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| match (self, other) {
                (
                    Self::RowLengthMismatch {
                        actual: a,
                        expected: ea,
                        ..
                    },
                    Self::RowLengthMismatch {
                        actual: b,
                        expected: eb,
                        ..
                    },
                ) => (a, ea).cmp(&(b, eb)),
                (Self::CellParseFailure { text: a, .. }, Self::CellParseFailure { text: b, .. }) => {
                    a.cmp(b)
                }
                _ => Ordering::Equal,
            })
    }
}

impl std::fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowLengthMismatch {
                row,
                actual,
                expected,
            } => write!(
                f,
                "Row {} has {} cells, but expected {}",
                row.get(),
                actual,
                expected
            ),
            Self::CellParseFailure { row, column, text } => write!(
                f,
                "Row {}, column {}: cannot parse {:?} as an integer",
                row.get(),
                column.get(),
                text
            ),
        }
    }
}
