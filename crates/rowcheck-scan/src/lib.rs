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

//! Rowcheck-Scan: the per-range half of parallel row validation
//!
//! Everything a single worker does, plus the pieces the pool uses to split
//! work and hand results out.
//!
//! Core flow
//! - `partition::partition` splits `[0, row_count)` into balanced contiguous
//!   ranges, one per worker.
//! - A `scanner::RangeScanner` (by default `scanner::IntegerScanner`) runs
//!   `validator::RangeValidator` over one range and returns a
//!   `result::RangeScan`.
//! - `monitor` types observe the scan and may stop it at a row boundary.
//! - `sink::ErrorSink` receives descriptors once a range is done.
//!
//! Guarantees
//! - Range validation is pure: it reads the shared `RowSet` and writes only
//!   to its own output list.
//! - Output of a range is in ascending row order, then ascending column.
//! - A range outside the row set panics before any row is read.
//!
//! Module map
//! - `cell`: integer cell parsing.
//! - `error`: contract violations (`ContractError`).
//! - `index`: `WorkerIndex`.
//! - `monitor`: scan monitors (interrupt, log, composite, no-op).
//! - `partition`: the partitioner and coverage checks.
//! - `result`: `RangeScan` and `TerminationReason`.
//! - `scanner`: the `RangeScanner` seam.
//! - `sink`: `ErrorSink` and its implementations.
//! - `stats`: `ValidationStatistics`.
//! - `validator`: `RangeValidator`, `validate_range`, `scan_range`.

pub mod cell;
pub mod error;
pub mod index;
pub mod monitor;
pub mod partition;
pub mod result;
pub mod scanner;
pub mod sink;
pub mod stats;
pub mod validator;
