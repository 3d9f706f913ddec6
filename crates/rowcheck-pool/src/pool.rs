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

//! # Parallel Validation Pool
//!
//! Splits a `RowSet` into balanced contiguous ranges and validates each range
//! on its own scoped worker thread. Every worker reads the same shared,
//! immutable `RowSet` and writes only its own descriptor list, so workers
//! never synchronize with each other while scanning.
//!
//! ## Highlights
//!
//! - Worker execution:
//!   - One named scoped thread per non-empty range (`std::thread::scope`).
//!   - A `CompositeMonitor` per thread with an optional interrupt monitor and
//!     a `LogMonitor`.
//! - Joining:
//!   - Every handle is joined before the scope ends, so a panicking worker
//!     can neither deadlock nor outlive the run.
//!   - A panic becomes `ValidationFault::WorkerPanicked` (the lowest worker
//!     index wins when several fail) and no partial descriptor list is
//!     returned.
//! - Reporting:
//!   - `ReportMode::AfterJoin` hands the combined list to the sink once all
//!     workers are done and none faulted.
//!   - `ReportMode::OnWorkerCompletion` lets each worker hand its finished
//!     list to the sink from its own thread.
//!
//! ## Usage
//!
//! ```rust
//! use rowcheck_model::rows::{ColumnSize, RowSet};
//! use rowcheck_pool::pool::ValidationPoolBuilder;
//! use rowcheck_scan::sink::CollectingSink;
//!
//! let rows = RowSet::from(vec![vec!["1", "2"], vec!["3", "x"], vec!["5", "6", "7"]]);
//! let sink = CollectingSink::new();
//!
//! let pool = ValidationPoolBuilder::new()
//!     .with_worker_count(2)
//!     .with_sink(&sink)
//!     .build();
//!
//! let outcome = pool.validate_all(&rows, ColumnSize::new(2)).unwrap();
//! assert_eq!(outcome.len(), 2);
//! assert_eq!(sink.len(), 2);
//! ```

use crate::{fault::ValidationFault, outcome::ValidationOutcome};
use rowcheck_model::{
    descriptor::ErrorDescriptor,
    rows::{ColumnSize, RowSet},
};
use rowcheck_scan::{
    index::WorkerIndex,
    monitor::{composite::CompositeMonitor, interrupt::InterruptMonitor, log::LogMonitor},
    partition::{PartitionRange, partition},
    result::{RangeScan, TerminationReason},
    scanner::{IntegerScanner, RangeScanner, ScanContext},
    sink::ErrorSink,
    stats::{ValidationStatistics, ValidationStatisticsBuilder},
};
use std::{any::Any, num::NonZeroUsize, sync::atomic::AtomicBool, time::Instant};

/// Rows between two progress events of a worker's `LogMonitor`.
const PROGRESS_EVERY: usize = 1 << 16;

/// When the sink receives descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportMode {
    /// After every worker has joined, in range order, and only if no worker
    /// faulted.
    #[default]
    AfterJoin,
    /// From each worker thread as soon as its range is done. Lists of
    /// different workers may arrive in any order; each list arrives whole.
    OnWorkerCompletion,
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportMode::AfterJoin => write!(f, "AfterJoin"),
            ReportMode::OnWorkerCompletion => write!(f, "OnWorkerCompletion"),
        }
    }
}

/// Returns the number of workers used when none is configured.
#[inline]
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub struct ValidationPool<'a, S = IntegerScanner> {
    scanner: S,
    worker_count: usize,
    sink: Option<&'a dyn ErrorSink>,
    interrupt: Option<&'a AtomicBool>,
    report_mode: ReportMode,
}

impl<S> std::fmt::Debug for ValidationPool<'_, S>
where
    S: RangeScanner,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPool")
            .field("scanner", &self.scanner.name())
            .field("worker_count", &self.worker_count)
            .field("sink", &self.sink.map(|s| s.name()))
            .field("interrupt", &self.interrupt.is_some())
            .field("report_mode", &self.report_mode)
            .finish()
    }
}

impl<'a, S> ValidationPool<'a, S>
where
    S: RangeScanner,
{
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[inline]
    pub fn report_mode(&self) -> ReportMode {
        self.report_mode
    }

    #[inline]
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    #[inline]
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    #[inline]
    pub fn has_interrupt(&self) -> bool {
        self.interrupt.is_some()
    }

    /// Validates every row of `rows` against `column_size`.
    ///
    /// # Errors
    ///
    /// - `ValidationFault::InvalidArgument` if the pool was configured with
    ///   zero workers.
    /// - `ValidationFault::WorkerPanicked` if any worker panicked.
    /// - `ValidationFault::Spawn` if a worker thread could not be started.
    pub fn validate_all(
        &self,
        rows: &RowSet,
        column_size: ColumnSize,
    ) -> Result<ValidationOutcome, ValidationFault> {
        let start_time = Instant::now();

        // 1. Split the work
        let ranges = partition(rows.len(), self.worker_count)?;

        if rows.is_empty() {
            tracing::info!("no rows to validate");
            let stats = ValidationStatisticsBuilder::new()
                .scan_duration(start_time.elapsed())
                .build();
            return Ok(ValidationOutcome::empty(stats));
        }

        tracing::info!(
            rows = rows.len(),
            workers = ranges.len(),
            column_size = column_size.get(),
            scanner = self.scanner.name(),
            "starting validation"
        );

        // 2. Run and join every worker
        let scans = self.run_workers(rows, column_size, &ranges)?;

        // 3. Combine in range order
        let outcome = self.construct_outcome(start_time, scans);

        if self.report_mode == ReportMode::AfterJoin {
            if let Some(sink) = self.sink {
                sink.report_all(outcome.descriptors());
            }
        }

        tracing::info!(
            descriptors = outcome.len(),
            termination = %outcome.termination(),
            elapsed = ?outcome.statistics().scan_duration,
            "validation finished"
        );

        Ok(outcome)
    }

    fn run_workers(
        &self,
        rows: &RowSet,
        column_size: ColumnSize,
        ranges: &[PartitionRange],
    ) -> Result<Vec<RangeScan>, ValidationFault> {
        let scanner = &self.scanner;
        let interrupt = self.interrupt;
        let worker_sink = match self.report_mode {
            ReportMode::OnWorkerCompletion => self.sink,
            ReportMode::AfterJoin => None,
        };

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(ranges.len());
            let mut spawn_fault = None;

            for (i, &range) in ranges.iter().enumerate() {
                let worker = WorkerIndex::new(i);
                let spawned = std::thread::Builder::new()
                    .name(format!("rowcheck-worker-{}", i))
                    .spawn_scoped(scope, move || {
                        let mut monitor = CompositeMonitor::with_capacity(2);
                        if let Some(flag) = interrupt {
                            monitor.add_monitor(InterruptMonitor::new(flag));
                        }
                        monitor.add_monitor(LogMonitor::new(worker, PROGRESS_EVERY));

                        let scan =
                            scanner.scan(ScanContext::new(rows, column_size, range, &mut monitor));

                        if let Some(sink) = worker_sink {
                            sink.report_all(scan.descriptors());
                        }
                        scan
                    });

                match spawned {
                    Ok(handle) => handles.push((worker, range, handle)),
                    Err(source) => {
                        tracing::error!(worker = i, error = %source, "failed to spawn worker");
                        spawn_fault = Some(ValidationFault::Spawn { worker, source });
                        break;
                    }
                }
            }

            // Join everything before deciding; a fault must not leave a
            // worker running past this point.
            let mut scans = Vec::with_capacity(handles.len());
            let mut first_fault = None;
            for (worker, range, handle) in handles {
                match handle.join() {
                    Ok(scan) => scans.push(scan),
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::error!(
                            worker = worker.get(),
                            range = %range,
                            message = %message,
                            "worker panicked"
                        );
                        if first_fault.is_none() {
                            first_fault = Some(ValidationFault::WorkerPanicked {
                                worker,
                                range,
                                message,
                            });
                        }
                    }
                }
            }

            // Spawning stops at the first failure, so every joined worker
            // has a lower index than the one that failed to start.
            match first_fault.or(spawn_fault) {
                Some(fault) => Err(fault),
                None => Ok(scans),
            }
        })
    }

    fn build_statistics(
        &self,
        start_time: Instant,
        scans: &[RangeScan],
        descriptors_found: usize,
    ) -> ValidationStatistics {
        let rows_scanned: usize = scans.iter().map(RangeScan::rows_scanned).sum();
        ValidationStatisticsBuilder::new()
            .rows_scanned(rows_scanned as u64)
            .descriptors_found(descriptors_found as u64)
            .used_workers(scans.len())
            .scan_duration(start_time.elapsed())
            .build()
    }

    fn construct_outcome(&self, start_time: Instant, scans: Vec<RangeScan>) -> ValidationOutcome {
        // A cancelled worker keeps what it found before it stopped; the
        // run as a whole reports the first cancellation.
        let termination = scans
            .iter()
            .map(RangeScan::termination)
            .find(|t| t.is_cancelled())
            .cloned()
            .unwrap_or(TerminationReason::Completed);

        let total: usize = scans.iter().map(|s| s.descriptors().len()).sum();
        let stats = self.build_statistics(start_time, &scans, total);

        let mut descriptors = Vec::with_capacity(total);
        for scan in scans {
            descriptors.extend(scan.into_descriptors());
        }

        ValidationOutcome::new(descriptors, termination, stats)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

pub struct ValidationPoolBuilder<'a, S = IntegerScanner> {
    scanner: S,
    worker_count: Option<usize>,
    sink: Option<&'a dyn ErrorSink>,
    interrupt: Option<&'a AtomicBool>,
    report_mode: ReportMode,
}

impl Default for ValidationPoolBuilder<'_, IntegerScanner> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationPoolBuilder<'_, IntegerScanner> {
    #[inline]
    pub fn new() -> Self {
        Self {
            scanner: IntegerScanner::new(),
            worker_count: None,
            sink: None,
            interrupt: None,
            report_mode: ReportMode::default(),
        }
    }
}

impl<'a, S> ValidationPoolBuilder<'a, S>
where
    S: RangeScanner,
{
    /// Sets the requested worker count. Zero is accepted here and rejected
    /// by `validate_all`.
    #[inline]
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    #[inline]
    pub fn with_sink(mut self, sink: &'a dyn ErrorSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Installs a cancellation flag. Workers stop at the next row boundary
    /// once it is set.
    #[inline]
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn with_report_mode(mut self, report_mode: ReportMode) -> Self {
        self.report_mode = report_mode;
        self
    }

    /// Replaces the range scanner.
    #[inline]
    pub fn with_scanner<R>(self, scanner: R) -> ValidationPoolBuilder<'a, R>
    where
        R: RangeScanner,
    {
        ValidationPoolBuilder {
            scanner,
            worker_count: self.worker_count,
            sink: self.sink,
            interrupt: self.interrupt,
            report_mode: self.report_mode,
        }
    }

    #[inline]
    pub fn build(self) -> ValidationPool<'a, S> {
        ValidationPool {
            scanner: self.scanner,
            worker_count: self.worker_count.unwrap_or_else(default_worker_count),
            sink: self.sink,
            interrupt: self.interrupt,
            report_mode: self.report_mode,
        }
    }
}

/// Validates `rows` with `worker_count` workers and returns the descriptors
/// in sequential scan order.
///
/// # Errors
///
/// See `ValidationPool::validate_all`.
pub fn validate_all(
    rows: &RowSet,
    column_size: ColumnSize,
    worker_count: usize,
) -> Result<Vec<ErrorDescriptor>, ValidationFault> {
    ValidationPoolBuilder::new()
        .with_worker_count(worker_count)
        .build()
        .validate_all(rows, column_size)
        .map(ValidationOutcome::into_descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let pool = ValidationPoolBuilder::new().build();
        assert!(pool.worker_count() >= 1);
        assert_eq!(pool.report_mode(), ReportMode::AfterJoin);
        assert!(!pool.has_sink());
        assert!(!pool.has_interrupt());
        assert_eq!(pool.scanner().name(), "IntegerScanner");
    }

    #[test]
    fn test_panic_message_extracts_str_and_string() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn Any + Send> = Box::new(7_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_statistics_reflect_the_run() {
        let rows = RowSet::from(vec![vec!["1"], vec!["x"], vec!["3"], vec!["y"], vec!["5"]]);
        let outcome = ValidationPoolBuilder::new()
            .with_worker_count(2)
            .build()
            .validate_all(&rows, ColumnSize::new(1))
            .unwrap();

        let stats = outcome.statistics();
        assert_eq!(stats.rows_scanned, 5);
        assert_eq!(stats.descriptors_found, 2);
        assert_eq!(stats.used_workers, 2);
    }
}
