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
use rowcheck_model::index::RowIndex;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum ScanCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for ScanCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanCommand::Continue => write!(f, "Continue"),
            ScanCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Lifecycle hooks for a single range scan.
///
/// `scan_command` is consulted before every row, so a monitor can stop a
/// worker between rows but never in the middle of one.
pub trait ScanMonitor {
    fn name(&self) -> &str;
    fn on_enter_range(&mut self, range: PartitionRange);
    fn on_row(&mut self, row: RowIndex, descriptors_emitted: usize);
    fn on_exit_range(&mut self, rows_scanned: usize, descriptors_found: usize);
    fn scan_command(&self) -> ScanCommand;
}

impl std::fmt::Debug for dyn ScanMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScanMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn ScanMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScanMonitor({})", self.name())
    }
}
