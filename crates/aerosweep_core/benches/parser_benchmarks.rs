//! Criterion benchmarks for the report parser
//!
//! Run with: cargo bench -p aerosweep_core

use aerosweep_core::report::{ReportParser, extract_coefficients, parse_report};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_REPORT: &str = include_str!("../testdata/for006_sample.dat");

/// A report padded with case output the parser must scan past
fn padded_report(repeats: usize) -> String {
    let filler = " 0.100E+01  0.200E+01  SOME CASE OUTPUT LINE WITHOUT A HEADING\n";
    let mut text = filler.repeat(repeats);
    text.push_str(SAMPLE_REPORT);
    text.push_str(&filler.repeat(repeats));
    text
}

fn bench_parse_sample(c: &mut Criterion) {
    c.bench_function("parse_sample_report", |b| {
        b.iter(|| parse_report(black_box(SAMPLE_REPORT)))
    });
}

fn bench_extract_coefficients(c: &mut Criterion) {
    c.bench_function("extract_coefficients", |b| {
        b.iter(|| extract_coefficients(black_box(SAMPLE_REPORT)))
    });
}

fn bench_padded_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("padded_report");
    let parser = ReportParser::new();

    for repeats in [100, 1_000, 10_000] {
        let text = padded_report(repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| parser.parse(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_sample,
    bench_extract_coefficients,
    bench_padded_reports
);
criterion_main!(benches);
