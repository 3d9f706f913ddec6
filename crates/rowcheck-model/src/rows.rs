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

//! Immutable row storage.
//!
//! A `RowSet` keeps every cell of every row in one flat vector plus a table
//! of row offsets, so the whole data set is a single allocation that workers
//! can borrow side by side. Once built it exposes no mutable access; the only
//! way to obtain one is through `RowSetBuilder::build` (or `From<Vec<Vec<_>>>`).

use crate::index::{ColumnIndex, RowIndex};
use rowcheck_core::math::interval::ClosedOpenInterval;
use std::str::FromStr;

/// The expected number of cells per row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ColumnSize(usize);

impl ColumnSize {
    /// Creates a new `ColumnSize`.
    #[inline(always)]
    pub const fn new(cells: usize) -> Self {
        Self(cells)
    }

    /// Returns the expected cell count.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ColumnSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ColumnSize {
    fn from(cells: usize) -> Self {
        Self(cells)
    }
}

/// Error returned when a textual column size is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnSizeParseError {
    /// The value parsed as an integer but was negative.
    #[error("column size must be non-negative, got {0}")]
    Negative(i128),
    /// The value was not an integer at all.
    #[error("column size '{0}' is not an integer")]
    NotAnInteger(String),
}

impl FromStr for ColumnSize {
    type Err = ColumnSizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i128 = s
            .parse()
            .map_err(|_| ColumnSizeParseError::NotAnInteger(s.to_string()))?;
        if value < 0 {
            return Err(ColumnSizeParseError::Negative(value));
        }
        usize::try_from(value)
            .map(ColumnSize)
            .map_err(|_| ColumnSizeParseError::NotAnInteger(s.to_string()))
    }
}

/// A borrowed view of one row inside a `RowSet`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Returns the number of cells in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cells of this row in column order.
    #[inline]
    pub fn cells(&self) -> &'a [String] {
        self.cells
    }

    /// Returns the cell at `column_index`, or `None` if the row is shorter.
    #[inline]
    pub fn cell(&self, column_index: ColumnIndex) -> Option<&'a str> {
        self.cells.get(column_index.get()).map(String::as_str)
    }

    /// Iterates over `(ColumnIndex, &str)` pairs in ascending column order.
    #[inline]
    pub fn enumerate(self) -> impl Iterator<Item = (ColumnIndex, &'a str)> + 'a {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (ColumnIndex::new(i), c.as_str()))
    }
}

impl std::fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.cells).finish()
    }
}

/// An ordered, immutable collection of rows.
///
/// Rows are stored back to back in `cells`; row `i` occupies
/// `cells[offsets[i]..offsets[i + 1]]`. `offsets` always has `len() + 1`
/// entries and starts at zero.
#[derive(Clone, PartialEq, Eq)]
pub struct RowSet {
    cells: Vec<String>,
    offsets: Vec<usize>,
}

impl RowSet {
    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns `true` if the set contains no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total number of cells over all rows.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the span `[0, len)` of valid row indices.
    #[inline]
    pub fn bounds(&self) -> ClosedOpenInterval<usize> {
        ClosedOpenInterval::new(0, self.len())
    }

    /// Returns the row at `row_index`.
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is out of bounds.
    #[inline]
    pub fn row(&self, row_index: RowIndex) -> Row<'_> {
        let index = row_index.get();
        assert!(
            index < self.len(),
            "called `RowSet::row` with row index out of bounds: the len is {} but the index is {}",
            self.len(),
            index
        );

        Row {
            cells: &self.cells[self.offsets[index]..self.offsets[index + 1]],
        }
    }

    /// Returns the row at `row_index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, row_index: RowIndex) -> Option<Row<'_>> {
        (row_index.get() < self.len()).then(|| self.row(row_index))
    }

    /// Iterates over all rows in index order.
    #[inline]
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = Row<'_>> + ExactSizeIterator + '_ {
        self.offsets.windows(2).map(move |w| Row {
            cells: &self.cells[w[0]..w[1]],
        })
    }

    /// The cell count of the first row, which callers conventionally use as
    /// the expected column size. `None` for an empty set.
    #[inline]
    pub fn column_size_hint(&self) -> Option<ColumnSize> {
        self.get(RowIndex::new(0)).map(|r| ColumnSize::new(r.len()))
    }
}

impl Default for RowSet {
    fn default() -> Self {
        RowSetBuilder::new().build()
    }
}

impl std::fmt::Debug for RowSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSet")
            .field("rows", &self.len())
            .field("cells", &self.num_cells())
            .finish()
    }
}

impl std::fmt::Display for RowSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RowSet(rows: {}, cells: {})", self.len(), self.num_cells())
    }
}

impl<S> From<Vec<Vec<S>>> for RowSet
where
    S: Into<String>,
{
    fn from(rows: Vec<Vec<S>>) -> Self {
        let mut builder = RowSetBuilder::with_capacity(rows.len(), 0);
        for row in rows {
            builder.push_row(row);
        }
        builder.build()
    }
}

/// Mutable staging area for a `RowSet`.
#[derive(Debug, Clone)]
pub struct RowSetBuilder {
    cells: Vec<String>,
    offsets: Vec<usize>,
}

impl Default for RowSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSetBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            offsets: vec![0],
        }
    }

    /// Creates a builder with room for `rows` rows and `cells` cells.
    #[inline]
    pub fn with_capacity(rows: usize, cells: usize) -> Self {
        let mut offsets = Vec::with_capacity(rows + 1);
        offsets.push(0);
        Self {
            cells: Vec::with_capacity(cells),
            offsets,
        }
    }

    /// Appends a row made of `cells`.
    pub fn push_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cells.extend(cells.into_iter().map(Into::into));
        self.offsets.push(self.cells.len());
        self
    }

    /// Returns the number of rows pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns `true` if no row has been pushed yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freezes the rows into an immutable `RowSet`.
    #[inline]
    pub fn build(mut self) -> RowSet {
        self.cells.shrink_to_fit();
        self.offsets.shrink_to_fit();
        RowSet {
            cells: self.cells,
            offsets: self.offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        RowSet::from(vec![vec!["1", "2"], vec!["3", "x"], vec!["5", "6", "7"]])
    }

    #[test]
    fn test_len_and_bounds() {
        let rows = sample();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.num_cells(), 7);
        assert_eq!(rows.bounds(), ClosedOpenInterval::new(0, 3));
        assert!(!rows.is_empty());
    }

    #[test]
    fn test_row_access_preserves_order() {
        let rows = sample();
        let r2 = rows.row(RowIndex::new(2));
        assert_eq!(r2.len(), 3);
        assert_eq!(r2.cells(), &["5", "6", "7"]);
        assert_eq!(r2.cell(ColumnIndex::new(1)), Some("6"));
        assert_eq!(r2.cell(ColumnIndex::new(3)), None);

        let lens: Vec<usize> = rows.rows().map(|r| r.len()).collect();
        assert_eq!(lens, vec![2, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "row index out of bounds")]
    fn test_row_out_of_bounds_panics() {
        let rows = sample();
        let _ = rows.row(RowIndex::new(3));
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        assert!(sample().get(RowIndex::new(3)).is_none());
    }

    #[test]
    fn test_empty_rows_are_kept() {
        let mut builder = RowSetBuilder::new();
        builder.push_row(["a"]).push_row(Vec::<String>::new()).push_row(["b", "c"]);
        let rows = builder.build();
        assert_eq!(rows.len(), 3);
        assert!(rows.row(RowIndex::new(1)).is_empty());
        assert_eq!(rows.row(RowIndex::new(2)).cells(), &["b", "c"]);
    }

    #[test]
    fn test_column_size_hint() {
        assert_eq!(sample().column_size_hint(), Some(ColumnSize::new(2)));
        assert_eq!(RowSet::default().column_size_hint(), None);
        assert!(RowSet::default().is_empty());
    }

    #[test]
    fn test_enumerate_yields_typed_columns() {
        let rows = sample();
        let pairs: Vec<(usize, &str)> = rows
            .row(RowIndex::new(1))
            .enumerate()
            .map(|(c, s)| (c.get(), s))
            .collect();
        assert_eq!(pairs, vec![(0, "3"), (1, "x")]);
    }

    #[test]
    fn test_column_size_from_str() {
        assert_eq!("4".parse::<ColumnSize>(), Ok(ColumnSize::new(4)));
        assert_eq!("0".parse::<ColumnSize>(), Ok(ColumnSize::new(0)));
        assert_eq!(
            "-1".parse::<ColumnSize>(),
            Err(ColumnSizeParseError::Negative(-1))
        );
        assert!(matches!(
            "four".parse::<ColumnSize>(),
            Err(ColumnSizeParseError::NotAnInteger(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", sample()), "RowSet(rows: 3, cells: 7)");
        assert_eq!(format!("{}", ColumnSize::new(9)), "9");
    }
}
