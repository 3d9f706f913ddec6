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

//! # Error Sinks
//!
//! An `ErrorSink` is where descriptors go once a worker (or the pool) hands
//! them over. Sinks are shared by reference across worker threads, so every
//! implementation serializes its own writes; a single descriptor is always
//! delivered whole.
//!
//! - `CollectingSink`: buffers descriptors in memory.
//! - `WriterSink`: renders one line per descriptor to any `io::Write`.
//! - `CountingSink`: counts descriptors per kind without keeping them.
//! - `NullSink`: discards everything.

use rowcheck_model::descriptor::ErrorDescriptor;
use std::{
    io::Write,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Boundary through which descriptors leave the validation core.
pub trait ErrorSink: Sync {
    fn name(&self) -> &str;

    /// Delivers a single descriptor.
    fn report(&self, descriptor: &ErrorDescriptor);

    /// Delivers a batch, keeping its order. Implementations that lock should
    /// override this to hold the lock once for the whole batch, so batches
    /// from different workers never interleave.
    fn report_all(&self, descriptors: &[ErrorDescriptor]) {
        for descriptor in descriptors {
            self.report(descriptor);
        }
    }
}

impl std::fmt::Debug for dyn ErrorSink + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ErrorSink({})", self.name())
    }
}

// A worker that panicked while holding the lock has already been turned into
// a fault by the pool; the buffered data itself is still consistent.
#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Collects descriptors in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    descriptors: Mutex<Vec<ErrorDescriptor>>,
}

impl CollectingSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of descriptors received so far.
    #[inline]
    pub fn len(&self) -> usize {
        lock(&self.descriptors).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of everything received so far.
    #[inline]
    pub fn snapshot(&self) -> Vec<ErrorDescriptor> {
        lock(&self.descriptors).clone()
    }

    /// Consumes the sink and returns the descriptors in arrival order.
    #[inline]
    pub fn into_descriptors(self) -> Vec<ErrorDescriptor> {
        self.descriptors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ErrorSink for CollectingSink {
    fn name(&self) -> &str {
        "CollectingSink"
    }

    fn report(&self, descriptor: &ErrorDescriptor) {
        lock(&self.descriptors).push(descriptor.clone());
    }

    fn report_all(&self, descriptors: &[ErrorDescriptor]) {
        lock(&self.descriptors).extend_from_slice(descriptors);
    }
}

/// Writes each descriptor's `Display` form as one line.
///
/// Write errors are counted, not propagated: a broken reporting channel must
/// not turn a finished validation into a fault.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
    write_errors: AtomicU64,
}

impl<W> WriterSink<W>
where
    W: Write + Send,
{
    #[inline]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Number of lines that could not be written.
    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    /// Flushes the underlying writer.
    pub fn flush(&self) -> std::io::Result<()> {
        lock(&self.writer).flush()
    }

    /// Consumes the sink and returns the writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_line(&self, writer: &mut W, descriptor: &ErrorDescriptor) {
        if writeln!(writer, "{}", descriptor).is_err() {
            self.write_errors.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl<W> ErrorSink for WriterSink<W>
where
    W: Write + Send,
{
    fn name(&self) -> &str {
        "WriterSink"
    }

    fn report(&self, descriptor: &ErrorDescriptor) {
        let mut writer = lock(&self.writer);
        self.write_line(&mut writer, descriptor);
    }

    fn report_all(&self, descriptors: &[ErrorDescriptor]) {
        let mut writer = lock(&self.writer);
        for descriptor in descriptors {
            self.write_line(&mut writer, descriptor);
        }
    }
}

/// Counts descriptors by kind.
#[derive(Debug, Default)]
pub struct CountingSink {
    row_length_mismatches: AtomicU64,
    cell_parse_failures: AtomicU64,
}

impl CountingSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn row_length_mismatches(&self) -> u64 {
        self.row_length_mismatches.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cell_parse_failures(&self) -> u64 {
        self.cell_parse_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.row_length_mismatches() + self.cell_parse_failures()
    }
}

impl ErrorSink for CountingSink {
    fn name(&self) -> &str {
        "CountingSink"
    }

    fn report(&self, descriptor: &ErrorDescriptor) {
        let counter = match descriptor {
            ErrorDescriptor::RowLengthMismatch { .. } => &self.row_length_mismatches,
            ErrorDescriptor::CellParseFailure { .. } => &self.cell_parse_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Discards every descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn name(&self) -> &str {
        "NullSink"
    }

    #[inline(always)]
    fn report(&self, _descriptor: &ErrorDescriptor) {}

    #[inline(always)]
    fn report_all(&self, _descriptors: &[ErrorDescriptor]) {}
}
