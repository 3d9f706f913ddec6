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

//! # Row Partitioning
//!
//! Splits `[0, row_count)` into contiguous, disjoint ranges, one per worker.
//! The split is balanced: with `k` effective workers, `row_count % k` ranges
//! carry one extra row, so any two ranges differ in length by at most one.
//! Ranges are produced in ascending row order, which keeps every worker's
//! output in sequential scan order.
//!
//! The effective worker count is `min(worker_count, max(row_count, 1))`, so
//! no range is empty unless the input itself is.
//!
//! ```rust
//! use rowcheck_scan::partition::partition;
//!
//! let ranges = partition(10, 3).unwrap();
//! let lens: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
//! assert_eq!(lens, vec![4, 3, 3]);
//! ```

use crate::error::ContractError;
use fixedbitset::FixedBitSet;
use rowcheck_core::math::interval::ClosedOpenInterval;

/// A half-open span of row indices assigned to one worker.
pub type PartitionRange = ClosedOpenInterval<usize>;

/// Returns how many workers `partition` will actually use.
///
/// # Errors
///
/// Returns `ContractError::InvalidWorkerCount` if `worker_count` is zero.
#[inline]
pub fn effective_worker_count(row_count: usize, worker_count: usize) -> Result<usize, ContractError> {
    if worker_count == 0 {
        return Err(ContractError::InvalidWorkerCount(worker_count));
    }
    Ok(worker_count.min(row_count.max(1)))
}

/// Partitions `[0, row_count)` into balanced contiguous ranges.
///
/// For `row_count == 0` the result is the single empty range `[0, 0)`.
///
/// # Errors
///
/// Returns `ContractError::InvalidWorkerCount` if `worker_count` is zero.
pub fn partition(row_count: usize, worker_count: usize) -> Result<Vec<PartitionRange>, ContractError> {
    let workers = effective_worker_count(row_count, worker_count)?;
    let base = row_count / workers;
    let remainder = row_count % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for w in 0..workers {
        let len = if w < remainder { base + 1 } else { base };
        ranges.push(PartitionRange::new(start, start + len));
        start += len;
    }

    debug_assert_eq!(start, row_count);
    debug_assert!(is_exact_cover(&ranges, row_count));

    Ok(ranges)
}

/// Returns `true` if `ranges` cover every index of `[0, row_count)` exactly
/// once, in any order. Empty ranges are allowed as long as their bounds stay
/// within `[0, row_count]`.
pub fn is_exact_cover(ranges: &[PartitionRange], row_count: usize) -> bool {
    let bounds = PartitionRange::new(0, row_count);
    let mut seen = FixedBitSet::with_capacity(row_count);

    for range in ranges {
        if !bounds.contains_interval(*range) {
            return false;
        }
        for row in range.iter() {
            if seen.put(row) {
                return false;
            }
        }
    }

    seen.count_ones(..) == row_count
}

/// Returns `max_len - min_len` over the non-empty ranges, or zero if there
/// are none.
pub fn imbalance(ranges: &[PartitionRange]) -> usize {
    let lens = ranges.iter().filter(|r| !r.is_empty()).map(|r| r.len());
    match (lens.clone().min(), lens.max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lens(ranges: &[PartitionRange]) -> Vec<usize> {
        ranges.iter().map(|r| r.len()).collect()
    }

    #[test]
    fn test_ten_rows_three_workers() {
        let ranges = partition(10, 3).unwrap();
        assert_eq!(
            ranges,
            vec![
                PartitionRange::new(0, 4),
                PartitionRange::new(4, 7),
                PartitionRange::new(7, 10),
            ]
        );
        assert!(is_exact_cover(&ranges, 10));
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(12, 4).unwrap();
        assert_eq!(lens(&ranges), vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_zero_rows_yields_single_empty_range() {
        let ranges = partition(0, 8).unwrap();
        assert_eq!(ranges, vec![PartitionRange::new(0, 0)]);
        assert!(ranges.iter().all(|r| r.is_empty()));
        assert!(is_exact_cover(&ranges, 0));
    }

    #[test]
    fn test_fewer_rows_than_workers_caps_worker_count() {
        let ranges = partition(3, 8).unwrap();
        assert_eq!(lens(&ranges), vec![1, 1, 1]);
        assert_eq!(effective_worker_count(3, 8), Ok(3));
    }

    #[test]
    fn test_single_worker_takes_everything() {
        let ranges = partition(17, 1).unwrap();
        assert_eq!(ranges, vec![PartitionRange::new(0, 17)]);
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        assert_eq!(partition(10, 0), Err(ContractError::InvalidWorkerCount(0)));
        assert_eq!(partition(0, 0), Err(ContractError::InvalidWorkerCount(0)));
    }

    #[test]
    fn test_exact_cover_detects_gap_overlap_and_overflow() {
        let gap = vec![PartitionRange::new(0, 3), PartitionRange::new(4, 6)];
        assert!(!is_exact_cover(&gap, 6));

        let overlap = vec![PartitionRange::new(0, 4), PartitionRange::new(3, 6)];
        assert!(!is_exact_cover(&overlap, 6));

        let overflow = vec![PartitionRange::new(0, 7)];
        assert!(!is_exact_cover(&overflow, 6));

        let shuffled = vec![PartitionRange::new(3, 6), PartitionRange::new(0, 3)];
        assert!(is_exact_cover(&shuffled, 6));
    }

    #[test]
    fn test_imbalance() {
        assert_eq!(imbalance(&partition(10, 3).unwrap()), 1);
        assert_eq!(imbalance(&partition(9, 3).unwrap()), 0);
        assert_eq!(imbalance(&[]), 0);
    }

    proptest! {
        #[test]
        fn prop_partition_covers_exactly(rows in 0usize..5_000, workers in 1usize..64) {
            let ranges = partition(rows, workers).unwrap();
            prop_assert!(is_exact_cover(&ranges, rows));

            let mut sorted = ranges.clone();
            sorted.sort_by_key(|r| r.start());
            prop_assert_eq!(sorted.first().map(|r| r.start()), Some(0));
            prop_assert_eq!(sorted.last().map(|r| r.end()), Some(rows));
            for pair in sorted.windows(2) {
                prop_assert_eq!(pair[0].end(), pair[1].start());
            }
        }

        #[test]
        fn prop_partition_is_balanced(rows in 0usize..5_000, workers in 1usize..64) {
            let ranges = partition(rows, workers).unwrap();
            prop_assert!(imbalance(&ranges) <= 1);
            prop_assert_eq!(ranges.len(), workers.min(rows.max(1)));
            if rows > 0 {
                prop_assert!(ranges.iter().all(|r| !r.is_empty()));
            }
        }
    }
}
