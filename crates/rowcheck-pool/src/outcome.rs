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

use rowcheck_model::descriptor::ErrorDescriptor;
use rowcheck_scan::{result::TerminationReason, stats::ValidationStatistics};
use rustc_hash::FxHashSet;

/// The result of a validation run that did not fault.
///
/// `descriptors` are grouped by partition range in ascending range order, and
/// within a range in sequential scan order, so the list equals what a single
/// sequential scan of the same rows would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    descriptors: Vec<ErrorDescriptor>,
    termination: TerminationReason,
    statistics: ValidationStatistics,
}

impl ValidationOutcome {
    #[inline]
    pub fn new(
        descriptors: Vec<ErrorDescriptor>,
        termination: TerminationReason,
        statistics: ValidationStatistics,
    ) -> Self {
        Self {
            descriptors,
            termination,
            statistics,
        }
    }

    /// The outcome of validating zero rows.
    #[inline]
    pub fn empty(statistics: ValidationStatistics) -> Self {
        Self::new(Vec::new(), TerminationReason::Completed, statistics)
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
    pub fn termination(&self) -> &TerminationReason {
        &self.termination
    }

    #[inline]
    pub fn statistics(&self) -> &ValidationStatistics {
        &self.statistics
    }

    /// Returns `true` if every row was scanned and none had a problem.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.descriptors.is_empty() && self.termination.is_completed()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of distinct rows with at least one problem.
    pub fn failing_rows(&self) -> usize {
        self.descriptors
            .iter()
            .map(|d| d.row())
            .collect::<FxHashSet<_>>()
            .len()
    }
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Validation Outcome: {} problems in {} rows ({})",
            self.len(),
            self.failing_rows(),
            self.termination
        )?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowcheck_model::{
        index::{ColumnIndex, RowIndex},
        rows::ColumnSize,
    };

    #[test]
    fn test_failing_rows_counts_distinct_rows() {
        let outcome = ValidationOutcome::new(
            vec![
                ErrorDescriptor::cell_parse_failure(RowIndex::new(1), ColumnIndex::new(0), "a"),
                ErrorDescriptor::cell_parse_failure(RowIndex::new(1), ColumnIndex::new(2), "b"),
                ErrorDescriptor::row_length_mismatch(RowIndex::new(4), 1, ColumnSize::new(3)),
            ],
            TerminationReason::Completed,
            ValidationStatistics::default(),
        );

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.failing_rows(), 2);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_empty_outcome_is_clean() {
        let outcome = ValidationOutcome::empty(ValidationStatistics::default());
        assert!(outcome.is_clean());
        assert!(outcome.is_empty());
        assert_eq!(outcome.failing_rows(), 0);
    }

    #[test]
    fn test_cancelled_outcome_is_not_clean() {
        let outcome = ValidationOutcome::new(
            Vec::new(),
            TerminationReason::Cancelled("stop".to_string()),
            ValidationStatistics::default(),
        );
        assert!(!outcome.is_clean());
    }
}
