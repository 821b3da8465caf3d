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
use std::hint::black_box;
use stratus_solver::{algorithm::Algorithm, comparison::Comparison, config::ComparisonConfig};

/// Environment sizes as (nodes, tasks).
const SIZES: [(usize, usize); 3] = [(10, 100), (30, 300), (60, 1000)];

fn comparison_for(nodes: usize, tasks: usize) -> Comparison {
    let config = ComparisonConfig::builder()
        .node_count(nodes)
        .task_count(tasks)
        .population_size(20)
        .iterations(20)
        .build()
        .expect("benchmark configuration must be valid");
    Comparison::new(config).expect("benchmark environment must build")
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithm_run");

    for (nodes, tasks) in SIZES {
        let comparison = comparison_for(nodes, tasks);
        let label = format!("{}x{}", nodes, tasks);
        group.throughput(Throughput::Elements(tasks as u64));

        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), &label),
                &comparison,
                |b, comparison| {
                    b.iter(|| {
                        let report = comparison
                            .run(black_box(algorithm))
                            .expect("default parameters must be valid");
                        black_box(report.summary.best_score)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_run_all(c: &mut Criterion) {
    let comparison = comparison_for(10, 100);
    c.bench_function("comparison_run_all_10x100", |b| {
        b.iter(|| black_box(comparison.run_all()))
    });
}

criterion_group!(benches, bench_algorithms, bench_run_all);
criterion_main!(benches);
