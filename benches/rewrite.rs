//! Criterion benchmarks for the rewrite hot path
//!
//! Benchmarks the per-value rewrite (uncached and memoized) and a full
//! stylesheet run, the operations a build pipeline pays for per file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transform3d::engine::{Diagnostics, Engine, Options};
use transform3d::rewrite::{rewrite_value, Rewriter};
use transform3d::stylesheet::parse;

/// Generate a transform value chaining n legacy calls
fn make_value(n: usize) -> String {
    let calls = ["translate(10px, 20px)", "scale(1.5)", "rotate(45deg)", "translateX(calc(10px + 5%))"];
    (0..n).map(|i| calls[i % calls.len()]).collect::<Vec<_>>().join(" ")
}

/// Generate a stylesheet with n rules, half of them animated
fn make_stylesheet(n: usize) -> String {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                format!(".r{} {{ transform: {}; transition: transform 0.3s; }}", i, make_value(3))
            } else {
                format!(".r{} {{ transform: {}; }}", i, make_value(2))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_rewrite_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_value");
    for n in [1usize, 4, 16] {
        let value = make_value(n);
        group.throughput(Throughput::Bytes(value.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &value, |b, value| {
            b.iter(|| rewrite_value(black_box(value)).unwrap());
        });
    }
    group.finish();
}

fn bench_rewriter_cached(c: &mut Criterion) {
    let value = make_value(8);
    c.bench_function("rewriter_cache_hit", |b| {
        let mut rewriter = Rewriter::new(true);
        rewriter.rewrite(&value).unwrap();
        b.iter(|| rewriter.rewrite(black_box(&value)).unwrap());
    });
}

fn bench_engine_process(c: &mut Criterion) {
    let css = make_stylesheet(100);
    c.bench_function("engine_process_100_rules", |b| {
        b.iter(|| {
            let mut parsed = parse(black_box(&css));
            let mut diags = Diagnostics::new();
            Engine::new(Options::default()).process(&mut parsed.stylesheet, &mut diags);
            parsed.stylesheet.to_css()
        });
    });
}

criterion_group!(benches, bench_rewrite_value, bench_rewriter_cached, bench_engine_process);
criterion_main!(benches);
