//! Benchmarks for the filter pipeline and a full dashboard render.
//!
//! Run with: cargo bench --bench pipeline

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sales_dashboard::aggregate::AggregationOptions;
use sales_dashboard::{CustomerType, Dataset, FilterState, SalesRecord, apply, render};
use std::collections::BTreeSet;

const CITIES: [&str; 3] = ["Yangon", "Mandalay", "Naypyitaw"];
const BRANCHES: [&str; 3] = ["A", "B", "C"];
const PRODUCT_LINES: [&str; 6] = [
    "Electronic accessories",
    "Fashion accessories",
    "Food and beverages",
    "Health and beauty",
    "Home and lifestyle",
    "Sports and travel",
];
const PAYMENTS: [&str; 3] = ["Cash", "Credit card", "Ewallet"];

/// Deterministic dataset of `rows` transactions spread over ninety days
fn synthetic_dataset(rows: usize) -> Dataset {
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let records = (0..rows)
        .map(|i| {
            let unit_price = 10.0 + (i * 37 % 90) as f64;
            let quantity = (i % 10 + 1) as i64;
            let cogs = unit_price * quantity as f64;
            let tax = cogs * 0.05;
            SalesRecord {
                date: Some(first_day + Duration::days((i % 90) as i64)),
                city: CITIES[i % CITIES.len()].to_string(),
                branch: BRANCHES[i % BRANCHES.len()].to_string(),
                product_line: PRODUCT_LINES[i % PRODUCT_LINES.len()].to_string(),
                payment_method: PAYMENTS[i / 7 % PAYMENTS.len()].to_string(),
                customer_type: if i % 2 == 0 {
                    CustomerType::Member
                } else {
                    CustomerType::Normal
                },
                total: cogs + tax,
                unit_price,
                quantity,
                tax,
                cogs,
                gross_income: tax,
                rating: 4.0 + (i * 13 % 60) as f64 / 10.0,
            }
        })
        .collect();
    Dataset::from_records(records)
}

/// One city, half the product lines
fn narrow_state(dataset: &Dataset) -> FilterState {
    let full = FilterState::default_for(dataset);
    let lines: BTreeSet<String> = PRODUCT_LINES[..3].iter().map(|l| l.to_string()).collect();
    let cities: BTreeSet<String> = [CITIES[0].to_string()].into_iter().collect();
    FilterState::new(cities, lines, full.date_range())
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let options = AggregationOptions::default();

    for rows in [1_000, 10_000, 100_000] {
        let dataset = synthetic_dataset(rows);
        let everything = FilterState::default_for(&dataset);
        let narrow = narrow_state(&dataset);

        group.bench_with_input(BenchmarkId::new("filter_all", rows), &rows, |b, _| {
            b.iter(|| black_box(apply(black_box(&dataset), &everything).len()));
        });

        group.bench_with_input(BenchmarkId::new("filter_narrow", rows), &rows, |b, _| {
            b.iter(|| black_box(apply(black_box(&dataset), &narrow).len()));
        });

        group.bench_with_input(BenchmarkId::new("render_all", rows), &rows, |b, _| {
            b.iter(|| black_box(render(black_box(&dataset), &everything, &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
