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

//! # Rowcheck Pool
//!
//! Parallel orchestration for row validation. The pool partitions a shared
//! `RowSet`, scans each range on its own scoped worker thread, joins them
//! all, and either returns the combined descriptor list or the fault that
//! prevented it.
//!
//! ## Modules
//!
//! - `pool`: `ValidationPool`, its builder, `ReportMode`, and the
//!   `validate_all` convenience function.
//! - `outcome`: `ValidationOutcome`, the result of a run that did not fault.
//! - `fault`: `ValidationFault`, the reasons a run can fail.
//!
//! The combined list is deterministic: it equals a sequential scan of all
//! rows, whatever the worker count.

pub mod fault;
pub mod outcome;
pub mod pool;
