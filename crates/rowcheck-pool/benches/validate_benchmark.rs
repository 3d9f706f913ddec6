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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rowcheck_model::rows::{ColumnSize, RowSet, RowSetBuilder};
use rowcheck_pool::pool::ValidationPoolBuilder;
use std::hint::black_box;

const ROWS: usize = 200_000;
const COLUMNS: usize = 8;

/// Mostly clean integer rows with a sprinkle of short rows and bad cells.
fn synthetic_rows(seed: u64) -> RowSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = RowSetBuilder::with_capacity(ROWS, ROWS * COLUMNS);

    for _ in 0..ROWS {
        let len = if rng.random_bool(0.01) {
            rng.random_range(0..COLUMNS)
        } else {
            COLUMNS
        };
        let row: Vec<String> = (0..len)
            .map(|_| {
                if rng.random_bool(0.005) {
                    "n/a".to_string()
                } else {
                    rng.random_range(-1_000_000_i64..1_000_000).to_string()
                }
            })
            .collect();
        builder.push_row(row);
    }
    builder.build()
}

fn bench_worker_counts(c: &mut Criterion) {
    let rows = synthetic_rows(42);
    let column_size = ColumnSize::new(COLUMNS);
    let max_workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let mut group = c.benchmark_group("validate_all");
    group.throughput(Throughput::Elements(rows.len() as u64));

    let mut workers = 1;
    while workers <= max_workers {
        let pool = ValidationPoolBuilder::new().with_worker_count(workers).build();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &rows, |b, rows| {
            b.iter(|| {
                let outcome = pool
                    .validate_all(black_box(rows), black_box(column_size))
                    .unwrap_or_else(|e| panic!("benchmark run faulted: {}", e));
                black_box(outcome.len())
            })
        });
        workers *= 2;
    }
    group.finish();
}

criterion_group!(benches, bench_worker_counts);
criterion_main!(benches);
