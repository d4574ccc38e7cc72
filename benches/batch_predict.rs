//! Batch prediction benchmark.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use groupfit::batch_predict;
use groupfit::testing::random_grouped_records;

fn bench_batch_predict(c: &mut Criterion) {
    let new_xs: Vec<f64> = (0..16).map(|i| i as f64).collect();

    let mut bench = c.benchmark_group("batch_predict");
    for &(n_groups, per_group) in &[(10usize, 100usize), (100, 100), (100, 1000)] {
        let records = random_grouped_records(n_groups, per_group, 42);
        bench.throughput(Throughput::Elements((n_groups * per_group) as u64));
        bench.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_groups}x{per_group}")),
            &records,
            |b, records| {
                b.iter(|| batch_predict(records, &["key"], "x", "y", &new_xs).unwrap());
            },
        );
    }
    bench.finish();
}

criterion_group!(benches, bench_batch_predict);
criterion_main!(benches);
