//! Decode benchmarks for the per-day pipeline stages.
//!
//! Run with: `cargo bench --package dukabars-bench`

use chrono::NaiveDate;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use dukabars_bench::{MINUTES_PER_DAY, compressed_day, raw_day};
use dukabars_fetch::{decompress_bi5, normalize, parse_records};
use dukabars_types::RecordFormat;
use std::hint::black_box;

fn decode_benchmark(c: &mut Criterion) {
    let format = RecordFormat::candles();
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let raw = raw_day(MINUTES_PER_DAY);
    let compressed = compressed_day(MINUTES_PER_DAY);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(u64::from(MINUTES_PER_DAY)));

    group.bench_function("decompress", |b| {
        b.iter(|| decompress_bi5(black_box(&compressed)).unwrap());
    });

    group.bench_function("parse_normalize", |b| {
        b.iter(|| normalize(parse_records(black_box(&raw), &format), day));
    });

    group.bench_function("full_day", |b| {
        b.iter(|| {
            let data = decompress_bi5(black_box(&compressed)).unwrap();
            normalize(parse_records(&data, &format), day)
        });
    });

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
