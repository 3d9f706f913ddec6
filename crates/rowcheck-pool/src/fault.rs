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

use rowcheck_scan::{error::ContractError, index::WorkerIndex, partition::PartitionRange};

/// Why a validation run could not produce a result.
///
/// Data problems never end up here; they are `ErrorDescriptor`s in the
/// outcome. A fault means the run itself failed and no descriptor list is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum ValidationFault {
    /// A caller contract was violated before any worker started.
    #[error(transparent)]
    InvalidArgument(#[from] ContractError),

    /// A worker panicked while scanning its range.
    #[error("worker {} panicked while validating rows {}: {}", worker.get(), range, message)]
    WorkerPanicked {
        worker: WorkerIndex,
        range: PartitionRange,
        message: String,
    },

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker {}", worker.get())]
    Spawn {
        worker: WorkerIndex,
        #[source]
        source: std::io::Error,
    },
}

impl ValidationFault {
    /// Returns the worker involved, if the fault is tied to one.
    #[inline]
    pub fn worker(&self) -> Option<WorkerIndex> {
        match self {
            ValidationFault::InvalidArgument(_) => None,
            ValidationFault::WorkerPanicked { worker, .. } | ValidationFault::Spawn { worker, .. } => {
                Some(*worker)
            }
        }
    }
}
