//! Benchmarks for slot indexing and per-day aggregation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dayline::aggregate::{aggregate, SlotIndex};
use dayline::DaySlot;

/// Synthetic slot list: `per_day` slots on each of `days` consecutive days.
fn synth_slots(days: i64, per_day: usize) -> Vec<DaySlot> {
    let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let mut slots = Vec::new();
    for day in 0..days {
        let date = (start + Duration::days(day)).format("%Y-%m-%d").to_string();
        for n in 0..per_day {
            slots.push(DaySlot {
                id: format!("{date}-{n}"),
                date: date.clone(),
                start_time: format!("{:02}:00", 6 + n % 12),
                end_time: format!("{:02}:00", 7 + n % 12),
                capacity: 20.0,
                remaining: Some((n % 21) as f64),
                blackout: n % 40 == 0,
                restrictions: None,
                notes: None,
                resource_unit: Some("tons".to_string()),
            });
        }
    }
    slots
}

/// Benchmark building the date-keyed index from scratch
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for days in [30i64, 365, 730] {
        let slots = synth_slots(days, 8);
        group.throughput(Throughput::Elements(slots.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &slots, |b, slots| {
            b.iter(|| SlotIndex::build(black_box(slots)));
        });
    }
    group.finish();
}

/// Benchmark summarizing a 14-day visible window via the index
fn bench_window_via_index(c: &mut Criterion) {
    let slots = synth_slots(730, 8);
    let index = SlotIndex::build(&slots);
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();

    c.bench_function("window_14_days_indexed", |b| {
        b.iter(|| {
            for day in 0..14 {
                let date = start + Duration::days(day);
                black_box(index.aggregate_for(black_box(date)));
            }
        })
    });
}

/// Benchmark the same window with the naive per-day full-list filter
fn bench_window_via_filter(c: &mut Criterion) {
    let slots = synth_slots(730, 8);
    let start = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();

    c.bench_function("window_14_days_filtered", |b| {
        b.iter(|| {
            for day in 0..14 {
                let date = (start + Duration::days(day)).format("%Y-%m-%d").to_string();
                black_box(aggregate(black_box(&date), black_box(&slots)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_window_via_index,
    bench_window_via_filter
);
criterion_main!(benches);
