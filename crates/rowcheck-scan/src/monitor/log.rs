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
    index::WorkerIndex,
    monitor::scan_monitor::{ScanCommand, ScanMonitor},
    partition::PartitionRange,
};
use rowcheck_model::index::RowIndex;
use std::time::{Duration, Instant};

/// Emits `tracing` events for one worker's range scan.
///
/// Range entry and exit are logged at `debug`; every `progress_every` rows a
/// `trace` progress event is emitted. A mask keeps the per-row cost to a
/// single bitwise test.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    worker: WorkerIndex,
    range: PartitionRange,
    start_time: Instant,
    progress_mask: usize,
    descriptors: usize,
}

impl LogMonitor {
    /// Creates a monitor for `worker` that reports progress every
    /// `progress_every` rows, rounded up to a power of two.
    pub fn new(worker: WorkerIndex, progress_every: usize) -> Self {
        Self {
            worker,
            range: PartitionRange::default(),
            start_time: Instant::now(),
            progress_mask: progress_every.max(1).next_power_of_two() - 1,
            descriptors: 0,
        }
    }

    /// Returns the time spent in the current range so far.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(worker: {}, progress_every: {})",
            self.worker,
            self.progress_mask + 1
        )
    }
}

impl ScanMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_range(&mut self, range: PartitionRange) {
        self.range = range;
        self.start_time = Instant::now();
        self.descriptors = 0;
        tracing::debug!(
            worker = self.worker.get(),
            start = range.start(),
            end = range.end(),
            "worker entered range"
        );
    }

    fn on_row(&mut self, row: RowIndex, descriptors_emitted: usize) {
        self.descriptors += descriptors_emitted;
        let done = row.get() - self.range.start() + 1;
        if done & self.progress_mask == 0 {
            tracing::trace!(
                worker = self.worker.get(),
                rows_done = done,
                rows_total = self.range.len(),
                descriptors = self.descriptors,
                "worker progress"
            );
        }
    }

    fn on_exit_range(&mut self, rows_scanned: usize, descriptors_found: usize) {
        tracing::debug!(
            worker = self.worker.get(),
            rows_scanned,
            descriptors_found,
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "worker finished range"
        );
    }

    fn scan_command(&self) -> ScanCommand {
        ScanCommand::Continue
    }
}
