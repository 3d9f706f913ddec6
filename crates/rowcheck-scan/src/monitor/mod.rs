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

//! # Scan Monitors
//!
//! Pluggable observers and controllers for range scans. A monitor sees each
//! range enter and exit and every row in between, and can stop the scan
//! between rows.
//!
//! ## Submodules
//!
//! - `scan_monitor`: core trait (`ScanMonitor`) and the `ScanCommand` enum.
//! - `composite`: aggregate multiple monitors into one.
//! - `interrupt`: cancellation through a shared `AtomicBool`.
//! - `log`: `tracing` events for range entry, exit and progress.
//! - `no_op`: a monitor that does nothing, for plain scans.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod scan_monitor;
