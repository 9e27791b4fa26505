//! 地块解析性能基准测试

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use plotmap::services::plots::{StructureCode, parse_plots};
use std::hint::black_box;

// ============== StructureCode::normalize 基准测试 ==============

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("plots/normalize");

    for raw in ["Not available", "P", "P+1E", "S+P+2E+M", "P+3E+1M+1S+D"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, raw| {
            b.iter(|| StructureCode::normalize(black_box(raw)));
        });
    }

    group.finish();
}

fn bench_levels(c: &mut Criterion) {
    let code = StructureCode::normalize("P+3E+1M");
    c.bench_function("plots/levels", |b| {
        b.iter(|| black_box(&code).levels());
    });
}

// ============== parse_plots 基准测试 ==============

fn build_csv(rows: usize) -> String {
    (0..rows)
        .map(|i| {
            format!(
                "{},{},\"Plot {}\",\"10\",\"20\",\"yes\",\"no\",\"P+{}E\",\"yes\",\"no\",\"5\",\"15\",\"water\"\n",
                45.0 + i as f64 * 0.001,
                24.0 + i as f64 * 0.001,
                i,
                i % 10
            )
        })
        .collect()
}

fn bench_parse_plots(c: &mut Criterion) {
    let mut group = c.benchmark_group("plots/parse");

    for rows in [10usize, 1_000, 10_000] {
        let csv = build_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| parse_plots(black_box(csv.as_bytes())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_levels, bench_parse_plots);
criterion_main!(benches);
