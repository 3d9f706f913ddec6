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

use rowcheck_model::{
    descriptor::ErrorDescriptor,
    index::{ColumnIndex, RowIndex},
    rows::{ColumnSize, RowSet},
};
use rowcheck_pool::{
    fault::ValidationFault,
    pool::{ReportMode, ValidationPoolBuilder, validate_all},
};
use rowcheck_scan::{
    error::ContractError,
    index::WorkerIndex,
    partition::PartitionRange,
    result::{RangeScan, TerminationReason},
    scanner::{IntegerScanner, RangeScanner, ScanContext},
    sink::{CollectingSink, CountingSink},
    validator::validate_range,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

fn ri(i: usize) -> RowIndex {
    RowIndex::new(i)
}

fn ci(i: usize) -> ColumnIndex {
    ColumnIndex::new(i)
}

fn sample_rows() -> RowSet {
    RowSet::from(vec![vec!["1", "2"], vec!["3", "x"], vec!["5", "6", "7"]])
}

/// Every fourth row is short, every seventh has a bad middle cell.
fn synthetic_rows(n: usize) -> RowSet {
    let rows: Vec<Vec<String>> = (0..n)
        .map(|i| {
            if i % 4 == 3 {
                vec![i.to_string()]
            } else if i % 7 == 0 {
                vec![i.to_string(), format!("v{}", i), "0".to_string()]
            } else {
                vec![i.to_string(), (i * 2).to_string(), "-1".to_string()]
            }
        })
        .collect();
    RowSet::from(rows)
}

#[test]
fn test_mixed_problems_are_found() {
    let found = validate_all(&sample_rows(), ColumnSize::new(2), 2).unwrap();

    assert_eq!(
        found,
        vec![
            ErrorDescriptor::cell_parse_failure(ri(1), ci(1), "x"),
            ErrorDescriptor::row_length_mismatch(ri(2), 3, ColumnSize::new(2)),
        ]
    );
}

#[test]
fn test_result_does_not_depend_on_worker_count() {
    let rows = synthetic_rows(1_000);
    let column_size = ColumnSize::new(3);
    let sequential = validate_range(&rows, column_size, rows.bounds());
    assert!(!sequential.is_empty());

    for workers in [1, 2, 3, 7, 16, 999, 1_000, 5_000] {
        let parallel = validate_all(&rows, column_size, workers).unwrap();
        assert_eq!(parallel, sequential, "worker count {}", workers);
    }
}

#[test]
fn test_zero_rows_yield_nothing_without_workers() {
    let rows = RowSet::from(Vec::<Vec<String>>::new());
    let calls = AtomicUsize::new(0);
    let scanner = CountingScanner { calls: &calls };

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(4)
        .with_scanner(scanner)
        .build()
        .validate_all(&rows, ColumnSize::new(3))
        .unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.statistics().used_workers, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_zero_workers_is_a_contract_fault() {
    let result = validate_all(&sample_rows(), ColumnSize::new(2), 0);
    assert!(matches!(
        result,
        Err(ValidationFault::InvalidArgument(ContractError::InvalidWorkerCount(0)))
    ));

    let empty = RowSet::from(Vec::<Vec<String>>::new());
    assert!(validate_all(&empty, ColumnSize::new(2), 0).is_err());
}

#[test]
fn test_more_workers_than_rows_uses_one_per_row() {
    let calls = AtomicUsize::new(0);
    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(64)
        .with_scanner(CountingScanner { calls: &calls })
        .build()
        .validate_all(&sample_rows(), ColumnSize::new(2))
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.statistics().used_workers, 3);
    assert_eq!(outcome.len(), 2);
}

struct CountingScanner<'a> {
    calls: &'a AtomicUsize,
}

impl RangeScanner for CountingScanner<'_> {
    fn name(&self) -> &str {
        "CountingScanner"
    }

    fn scan(&self, context: ScanContext<'_, '_>) -> RangeScan {
        self.calls.fetch_add(1, Ordering::SeqCst);
        IntegerScanner::<i64>::new().scan(context)
    }
}

struct PanicOnRow {
    row: usize,
}

impl RangeScanner for PanicOnRow {
    fn name(&self) -> &str {
        "PanicOnRow"
    }

    fn scan(&self, context: ScanContext<'_, '_>) -> RangeScan {
        if context.range.contains_point(self.row) {
            panic!("poisoned row {}", self.row);
        }
        IntegerScanner::<i64>::new().scan(context)
    }
}

#[test]
fn test_worker_panic_becomes_fault() {
    let rows = synthetic_rows(100);
    let sink = CollectingSink::new();

    // 4 workers over 100 rows: worker 2 owns [50, 75).
    let result = ValidationPoolBuilder::new()
        .with_worker_count(4)
        .with_sink(&sink)
        .with_scanner(PanicOnRow { row: 60 })
        .build()
        .validate_all(&rows, ColumnSize::new(3));

    match result {
        Err(ValidationFault::WorkerPanicked {
            worker,
            range,
            message,
        }) => {
            assert_eq!(worker, WorkerIndex::new(2));
            assert_eq!(range, PartitionRange::new(50, 75));
            assert_eq!(message, "poisoned row 60");
        }
        other => panic!("expected a worker fault, got {:?}", other),
    }

    // Nothing reaches the sink after a fault in the default mode.
    assert!(sink.is_empty());
}

#[test]
fn test_preset_interrupt_cancels_every_worker() {
    let rows = synthetic_rows(100);
    let flag = AtomicBool::new(true);

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(4)
        .with_interrupt(&flag)
        .build()
        .validate_all(&rows, ColumnSize::new(3))
        .unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.statistics().rows_scanned, 0);
    assert_eq!(
        outcome.termination(),
        &TerminationReason::Cancelled("Interrupt signal received".to_string())
    );
}

#[test]
fn test_clear_interrupt_does_not_change_the_result() {
    let rows = synthetic_rows(200);
    let flag = AtomicBool::new(false);

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(3)
        .with_interrupt(&flag)
        .build()
        .validate_all(&rows, ColumnSize::new(3))
        .unwrap();

    assert!(outcome.termination().is_completed());
    assert_eq!(
        outcome.descriptors(),
        validate_range(&rows, ColumnSize::new(3), rows.bounds()).as_slice()
    );
}

#[test]
fn test_after_join_reports_in_range_order() {
    let rows = synthetic_rows(300);
    let sink = CollectingSink::new();

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(5)
        .with_sink(&sink)
        .build()
        .validate_all(&rows, ColumnSize::new(3))
        .unwrap();

    assert_eq!(sink.into_descriptors(), outcome.into_descriptors());
}

#[test]
fn test_on_worker_completion_reports_every_descriptor_once() {
    let rows = synthetic_rows(300);
    let sink = CollectingSink::new();

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(5)
        .with_sink(&sink)
        .with_report_mode(ReportMode::OnWorkerCompletion)
        .build()
        .validate_all(&rows, ColumnSize::new(3))
        .unwrap();

    // Arrival order across workers is unspecified; compare canonically.
    let mut reported = sink.into_descriptors();
    reported.sort();
    let mut expected = outcome.into_descriptors();
    expected.sort();
    assert_eq!(reported, expected);
}

#[test]
fn test_counting_sink_sees_both_kinds() {
    let sink = CountingSink::new();
    ValidationPoolBuilder::new()
        .with_worker_count(2)
        .with_sink(&sink)
        .build()
        .validate_all(&sample_rows(), ColumnSize::new(2))
        .unwrap();

    assert_eq!(sink.row_length_mismatches(), 1);
    assert_eq!(sink.cell_parse_failures(), 1);
}

#[test]
fn test_failing_rows_and_statistics() {
    let rows = RowSet::from(vec![
        vec!["a", "b"],
        vec!["1", "2"],
        vec!["3"],
        vec!["4", "5"],
    ]);

    let outcome = ValidationPoolBuilder::new()
        .with_worker_count(2)
        .build()
        .validate_all(&rows, ColumnSize::new(2))
        .unwrap();

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.failing_rows(), 2);
    assert_eq!(outcome.statistics().rows_scanned, 4);
    assert_eq!(outcome.statistics().descriptors_found, 3);
}
