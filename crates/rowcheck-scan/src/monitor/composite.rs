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

/// A composite monitor that aggregates multiple monitors and forwards events to all of them.
///
/// `scan_command` returns the first `Terminate` issued by any member, in
/// insertion order.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn ScanMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: ScanMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn ScanMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a> FromIterator<Box<dyn ScanMonitor + 'a>> for CompositeMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn ScanMonitor + 'a>>,
    {
        CompositeMonitor {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl ScanMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_range(&mut self, range: PartitionRange) {
        for monitor in &mut self.monitors {
            monitor.on_enter_range(range);
        }
    }

    fn on_row(&mut self, row: RowIndex, descriptors_emitted: usize) {
        for monitor in &mut self.monitors {
            monitor.on_row(row, descriptors_emitted);
        }
    }

    fn on_exit_range(&mut self, rows_scanned: usize, descriptors_found: usize) {
        for monitor in &mut self.monitors {
            monitor.on_exit_range(rows_scanned, descriptors_found);
        }
    }

    fn scan_command(&self) -> ScanCommand {
        self.monitors
            .iter()
            .map(|m| m.scan_command())
            .find(|c| matches!(c, ScanCommand::Terminate(_)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{interrupt::InterruptMonitor, no_op::NoOpMonitor};
    use std::{
        cell::RefCell,
        rc::Rc,
        sync::atomic::{AtomicBool, Ordering},
    };

    #[derive(Default)]
    struct Recording {
        entered: Vec<PartitionRange>,
        rows: Vec<usize>,
        exited: Vec<(usize, usize)>,
    }

    struct RecordingMonitor(Rc<RefCell<Recording>>);

    impl ScanMonitor for RecordingMonitor {
        fn name(&self) -> &str {
            "RecordingMonitor"
        }
        fn on_enter_range(&mut self, range: PartitionRange) {
            self.0.borrow_mut().entered.push(range);
        }
        fn on_row(&mut self, row: RowIndex, _descriptors_emitted: usize) {
            self.0.borrow_mut().rows.push(row.get());
        }
        fn on_exit_range(&mut self, rows_scanned: usize, descriptors_found: usize) {
            self.0
                .borrow_mut()
                .exited
                .push((rows_scanned, descriptors_found));
        }
        fn scan_command(&self) -> ScanCommand {
            ScanCommand::Continue
        }
    }

    #[test]
    fn test_events_fan_out_to_all_members() {
        let a = Rc::new(RefCell::new(Recording::default()));
        let b = Rc::new(RefCell::new(Recording::default()));

        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(RecordingMonitor(Rc::clone(&a)));
        composite.add_monitor_boxed(Box::new(RecordingMonitor(Rc::clone(&b))));
        assert_eq!(composite.len(), 2);

        composite.on_enter_range(PartitionRange::new(0, 2));
        composite.on_row(RowIndex::new(0), 0);
        composite.on_row(RowIndex::new(1), 1);
        composite.on_exit_range(2, 1);

        for rec in [a, b] {
            let rec = rec.borrow();
            assert_eq!(rec.entered, vec![PartitionRange::new(0, 2)]);
            assert_eq!(rec.rows, vec![0, 1]);
            assert_eq!(rec.exited, vec![(2, 1)]);
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.scan_command(), ScanCommand::Continue);
    }

    #[test]
    fn test_any_terminate_wins() {
        let flag = AtomicBool::new(false);
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(NoOpMonitor::new());
        composite.add_monitor(InterruptMonitor::new(&flag));

        assert_eq!(composite.scan_command(), ScanCommand::Continue);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            composite.scan_command(),
            ScanCommand::Terminate("Interrupt signal received".to_string())
        );
    }

    #[test]
    fn test_display_lists_member_names() {
        let composite: CompositeMonitor<'_> = vec![
            Box::new(NoOpMonitor::new()) as Box<dyn ScanMonitor>,
            Box::new(NoOpMonitor::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            composite.to_string(),
            "CompositeMonitor([NoOpMonitor, NoOpMonitor])"
        );
    }
}
