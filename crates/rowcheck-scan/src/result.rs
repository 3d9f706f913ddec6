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

use crate::partition::PartitionRange;
use rowcheck_model::descriptor::ErrorDescriptor;

/// Why a range scan (or a whole validation run) stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TerminationReason {
    /// Every row of the range was scanned.
    #[default]
    Completed,
    /// A monitor asked the scan to stop before the end of the range.
    /// The string carries the monitor's reason.
    Cancelled(String),
}

impl TerminationReason {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, TerminationReason::Completed)
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TerminationReason::Cancelled(_))
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::Cancelled(reason) => write!(f, "Cancelled: {}", reason),
        }
    }
}

/// The result of scanning one partition range.
///
/// `descriptors` are in ascending row order, and in ascending column order
/// within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeScan {
    range: PartitionRange,
    descriptors: Vec<ErrorDescriptor>,
    rows_scanned: usize,
    termination: TerminationReason,
}

impl RangeScan {
    #[inline]
    pub fn new(
        range: PartitionRange,
        descriptors: Vec<ErrorDescriptor>,
        rows_scanned: usize,
        termination: TerminationReason,
    ) -> Self {
        debug_assert!(
            rows_scanned <= range.len(),
            "called `RangeScan::new` with more rows scanned ({}) than the range holds ({})",
            rows_scanned,
            range.len()
        );

        Self {
            range,
            descriptors,
            rows_scanned,
            termination,
        }
    }

    /// A scan of `range` that did no work.
    #[inline]
    pub fn empty(range: PartitionRange) -> Self {
        Self::new(range, Vec::new(), 0, TerminationReason::Completed)
    }

    #[inline]
    pub fn range(&self) -> PartitionRange {
        self.range
    }

    #[inline]
    pub fn descriptors(&self) -> &[ErrorDescriptor] {
        &self.descriptors
    }

    #[inline]
    pub fn into_descriptors(self) -> Vec<ErrorDescriptor> {
        self.descriptors
    }

    #[inline]
    pub fn rows_scanned(&self) -> usize {
        self.rows_scanned
    }

    #[inline]
    pub fn termination(&self) -> &TerminationReason {
        &self.termination
    }
}

impl std::fmt::Display for RangeScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RangeScan(range: {}, rows_scanned: {}, descriptors: {}, termination: {})",
            self.range,
            self.rows_scanned,
            self.descriptors.len(),
            self.termination
        )
    }
}
