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
    monitor::scan_monitor::{ScanCommand, ScanMonitor},
    partition::PartitionRange,
};
use rowcheck_model::index::RowIndex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A scan monitor that checks an atomic boolean flag to determine
/// whether the scan should be cancelled.
///
/// The flag is shared by reference between the caller and every worker;
/// setting it to `true` stops each worker before its next row.
#[derive(Debug, Clone, Copy)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a new `InterruptMonitor` that watches `stop_flag`.
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl ScanMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_range(&mut self, _range: PartitionRange) {}
    fn on_row(&mut self, _row: RowIndex, _descriptors_emitted: usize) {}
    fn on_exit_range(&mut self, _rows_scanned: usize, _descriptors_found: usize) {}

    fn scan_command(&self) -> ScanCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            ScanCommand::Terminate("Interrupt signal received".to_string())
        } else {
            ScanCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::monitor::scan_monitor::{ScanCommand, ScanMonitor};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        match monitor.scan_command() {
            ScanCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        flag.store(true, Ordering::Relaxed);

        match monitor.scan_command() {
            ScanCommand::Terminate(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
