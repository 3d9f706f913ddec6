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

/// Statistics collected during a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationStatistics {
    /// Number of rows actually scanned (less than the row count if cancelled).
    pub rows_scanned: u64,
    /// Number of error descriptors produced.
    pub descriptors_found: u64,
    /// Number of worker threads that scanned a range.
    pub used_workers: usize,
    /// Wall-clock duration of the run, partitioning and joining included.
    pub scan_duration: std::time::Duration,
}

impl std::fmt::Display for ValidationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Statistics:")?;
        writeln!(f, "  Rows Scanned: {}", self.rows_scanned)?;
        writeln!(f, "  Descriptors Found: {}", self.descriptors_found)?;
        writeln!(f, "  Used Workers: {}", self.used_workers)?;
        writeln!(
            f,
            "  Scan Duration (secs): {:.3}",
            self.scan_duration.as_secs_f64()
        )
    }
}

/// Builder for `ValidationStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationStatisticsBuilder {
    rows_scanned: u64,
    descriptors_found: u64,
    used_workers: usize,
    scan_duration: std::time::Duration,
}

impl Default for ValidationStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationStatisticsBuilder {
    /// Creates a new `ValidationStatisticsBuilder` with zeroed values.
    #[inline]
    pub fn new() -> Self {
        Self {
            rows_scanned: 0,
            descriptors_found: 0,
            used_workers: 0,
            scan_duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn rows_scanned(mut self, rows_scanned: u64) -> Self {
        self.rows_scanned = rows_scanned;
        self
    }

    #[inline]
    pub fn descriptors_found(mut self, descriptors_found: u64) -> Self {
        self.descriptors_found = descriptors_found;
        self
    }

    #[inline]
    pub fn used_workers(mut self, used_workers: usize) -> Self {
        self.used_workers = used_workers;
        self
    }

    #[inline]
    pub fn scan_duration(mut self, scan_duration: std::time::Duration) -> Self {
        self.scan_duration = scan_duration;
        self
    }

    /// Builds the `ValidationStatistics` instance.
    #[inline]
    pub fn build(self) -> ValidationStatistics {
        ValidationStatistics {
            rows_scanned: self.rows_scanned,
            descriptors_found: self.descriptors_found,
            used_workers: self.used_workers,
            scan_duration: self.scan_duration,
        }
    }
}
