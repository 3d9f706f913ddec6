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

//! # Range Validation
//!
//! Checks every row of a half-open range against the expected column size
//! and the integer cell rule:
//!
//! - a row whose length differs from the column size yields one
//!   `RowLengthMismatch` and its cells are not inspected;
//! - otherwise every cell that does not parse yields one `CellParseFailure`,
//!   in ascending column order.
//!
//! Rows are visited in ascending order, so the output of a range is already
//! in sequential scan order. A range that reaches past the end of the row
//! set is a caller bug and panics before any row is touched.
//!
//! ```rust
//! use rowcheck_core::math::interval::ClosedOpenInterval;
//! use rowcheck_model::rows::{ColumnSize, RowSet};
//! use rowcheck_scan::validator::validate_range;
//!
//! let rows = RowSet::from(vec![vec!["1", "2"], vec!["3", "x"], vec!["5", "6", "7"]]);
//! let found = validate_range(&rows, ColumnSize::new(2), ClosedOpenInterval::new(0, 3));
//! assert_eq!(found.len(), 2);
//! ```

use crate::{
    cell::is_integer,
    monitor::{
        no_op::NoOpMonitor,
        scan_monitor::{ScanCommand, ScanMonitor},
    },
    partition::PartitionRange,
    result::{RangeScan, TerminationReason},
};
use num_traits::PrimInt;
use rowcheck_model::{
    descriptor::ErrorDescriptor,
    index::RowIndex,
    rows::{ColumnSize, Row, RowSet},
};
use std::{marker::PhantomData, str::FromStr};

/// Validates ranges of rows whose cells must parse as `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValidator<T = i64> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for RangeValidator<T> {
    #[inline]
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> RangeValidator<T>
where
    T: PrimInt + FromStr,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `range` without any monitoring.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not contained in `[0, rows.len())`.
    #[inline]
    pub fn validate(
        &self,
        rows: &RowSet,
        column_size: ColumnSize,
        range: PartitionRange,
    ) -> Vec<ErrorDescriptor> {
        let mut monitor = NoOpMonitor::new();
        self.scan(rows, column_size, range, &mut monitor)
            .into_descriptors()
    }

    /// Validates `range`, consulting `monitor` before each row.
    ///
    /// When the monitor asks to terminate, the scan stops at a row boundary
    /// and returns what it found so far with a `Cancelled` termination.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not contained in `[0, rows.len())`.
    pub fn scan(
        &self,
        rows: &RowSet,
        column_size: ColumnSize,
        range: PartitionRange,
        monitor: &mut dyn ScanMonitor,
    ) -> RangeScan {
        assert!(
            rows.bounds().contains_interval(range),
            "called `RangeValidator::scan` with range {} outside of the row set bounds {}",
            range,
            rows.bounds()
        );

        monitor.on_enter_range(range);

        let mut descriptors = Vec::new();
        let mut rows_scanned = 0;
        let mut termination = TerminationReason::Completed;

        for index in range.iter() {
            if let ScanCommand::Terminate(reason) = monitor.scan_command() {
                termination = TerminationReason::Cancelled(reason);
                break;
            }

            let row_index = RowIndex::new(index);
            let before = descriptors.len();
            self.check_row(row_index, rows.row(row_index), column_size, &mut descriptors);
            rows_scanned += 1;

            monitor.on_row(row_index, descriptors.len() - before);
        }

        monitor.on_exit_range(rows_scanned, descriptors.len());
        RangeScan::new(range, descriptors, rows_scanned, termination)
    }

    #[inline]
    fn check_row(
        &self,
        row_index: RowIndex,
        row: Row<'_>,
        column_size: ColumnSize,
        out: &mut Vec<ErrorDescriptor>,
    ) {
        if row.len() != column_size.get() {
            out.push(ErrorDescriptor::row_length_mismatch(
                row_index,
                row.len(),
                column_size,
            ));
            return;
        }

        for (column_index, text) in row.enumerate() {
            if !is_integer::<T>(text) {
                out.push(ErrorDescriptor::cell_parse_failure(
                    row_index,
                    column_index,
                    text,
                ));
            }
        }
    }
}

/// Validates `range` of `rows` with 64-bit integer cells.
///
/// # Panics
///
/// Panics if `range` is not contained in `[0, rows.len())`.
#[inline]
pub fn validate_range(
    rows: &RowSet,
    column_size: ColumnSize,
    range: PartitionRange,
) -> Vec<ErrorDescriptor> {
    RangeValidator::<i64>::new().validate(rows, column_size, range)
}

/// Monitored form of `validate_range`.
///
/// # Panics
///
/// Panics if `range` is not contained in `[0, rows.len())`.
#[inline]
pub fn scan_range(
    rows: &RowSet,
    column_size: ColumnSize,
    range: PartitionRange,
    monitor: &mut dyn ScanMonitor,
) -> RangeScan {
    RangeValidator::<i64>::new().scan(rows, column_size, range, monitor)
}
