//! Criterion benchmarks for the structural match engine.

use contour::pattern::{any_of, array, number, optional, select_as, string};
use contour::{is_match, match_select, Pattern, Value};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_literal_match(c: &mut Criterion) {
    let pattern = Pattern::from("process_creation");
    let hit = Value::from("process_creation");
    let miss = Value::from("network_connection");

    c.bench_function("literal_hit", |b| {
        b.iter(|| is_match(black_box(&pattern), black_box(&hit)))
    });
    c.bench_function("literal_miss", |b| {
        b.iter(|| is_match(black_box(&pattern), black_box(&miss)))
    });
}

fn bench_nested_record_match(c: &mut Criterion) {
    let pattern = Pattern::record([
        ("kind", any_of(vec![Pattern::from("alert"), Pattern::from("event")])),
        (
            "detail",
            Pattern::record([
                ("level", number()),
                ("note", optional(string())),
            ]),
        ),
    ]);
    let value = Value::from_json(&serde_json::json!({
        "kind": "event",
        "detail": {"level": 4, "extra": [1, 2, 3]},
        "host": "build-17"
    }));

    c.bench_function("nested_record", |b| {
        b.iter(|| is_match(black_box(&pattern), black_box(&value)))
    });
}

fn bench_array_selection(c: &mut Criterion) {
    let pattern = Pattern::record([(
        "tags",
        array(select_as("tag", string()).expect("name is not reserved")),
    )]);
    let tags: Vec<serde_json::Value> = (0..64)
        .map(|i| serde_json::Value::String(format!("tag-{i}")))
        .collect();
    let value = Value::from_json(&serde_json::json!({ "tags": tags }));

    c.bench_function("array_selection_64", |b| {
        b.iter(|| match_select(black_box(&pattern), black_box(&value)))
    });
}

criterion_group!(
    benches,
    bench_literal_match,
    bench_nested_record_match,
    bench_array_selection
);
criterion_main!(benches);
