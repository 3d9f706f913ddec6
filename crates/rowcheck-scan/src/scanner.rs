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

use crate::{
    monitor::scan_monitor::ScanMonitor, partition::PartitionRange, result::RangeScan,
    validator::RangeValidator,
};
use num_traits::PrimInt;
use rowcheck_model::rows::{ColumnSize, RowSet};
use std::str::FromStr;

/// Everything a worker needs to scan its range.
pub struct ScanContext<'a, 'm> {
    pub rows: &'a RowSet,
    pub column_size: ColumnSize,
    pub range: PartitionRange,
    pub monitor: &'m mut dyn ScanMonitor,
}

impl<'a, 'm> ScanContext<'a, 'm> {
    #[inline]
    pub fn new(
        rows: &'a RowSet,
        column_size: ColumnSize,
        range: PartitionRange,
        monitor: &'m mut dyn ScanMonitor,
    ) -> Self {
        Self {
            rows,
            column_size,
            range,
            monitor,
        }
    }
}

impl std::fmt::Debug for ScanContext<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanContext")
            .field("rows", &self.rows.len())
            .field("column_size", &self.column_size)
            .field("range", &self.range)
            .field("monitor", &self.monitor.name())
            .finish()
    }
}

/// A strategy that scans one partition range. Shared by reference across
/// all workers of a pool.
pub trait RangeScanner: Sync {
    fn name(&self) -> &str;
    fn scan(&self, context: ScanContext<'_, '_>) -> RangeScan;
}

impl std::fmt::Debug for dyn RangeScanner + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RangeScanner({})", self.name())
    }
}

impl<S> RangeScanner for &S
where
    S: RangeScanner + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn scan(&self, context: ScanContext<'_, '_>) -> RangeScan {
        (**self).scan(context)
    }
}

/// The default scanner: row length plus integer cells of type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerScanner<T = i64> {
    validator: RangeValidator<T>,
}

impl<T> Default for IntegerScanner<T> {
    #[inline]
    fn default() -> Self {
        Self {
            validator: RangeValidator::default(),
        }
    }
}

impl<T> IntegerScanner<T>
where
    T: PrimInt + FromStr,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> RangeScanner for IntegerScanner<T>
where
    T: PrimInt + FromStr,
{
    fn name(&self) -> &str {
        "IntegerScanner"
    }

    fn scan(&self, context: ScanContext<'_, '_>) -> RangeScan {
        self.validator.scan(
            context.rows,
            context.column_size,
            context.range,
            context.monitor,
        )
    }
}
