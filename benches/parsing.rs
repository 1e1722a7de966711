//! Benchmarks for chatmerge extraction and merging.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- wrapped`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatmerge::config::DedupPolicy;
use chatmerge::{Event, Extractor, Merger, merge_event_sequences};

use chrono::{Duration, TimeZone, Utc};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_wrapped_json(count: usize) -> String {
    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "user1" } else { "user2" };
        let minute = i % 60;
        let hour = (i / 60) % 24;
        if i % 3 == 0 {
            messages.push(format!(
                r#"{{"id": {i}, "type": "message", "date": "2026-01-15T{hour:02}:{minute:02}:00", "from_id": "{sender}", "text": ["Message ", {{"type": "bold", "text": "number"}}, " {i}"], "text_entities": [{{"type": "plain", "text": "Message "}}, {{"type": "bold", "text": "number"}}, {{"type": "plain", "text": " {i}"}}]}}"#
            ));
        } else {
            messages.push(format!(
                r#"{{"id": {i}, "type": "message", "date": "2026-01-15T{hour:02}:{minute:02}:00", "from_id": "{sender}", "text": "Message number {i}"}}"#
            ));
        }
    }
    format!(
        r#"{{"name": "Bench Chat", "type": "personal_chat", "id": 100, "messages": [{}]}}"#,
        messages.join(",\n")
    )
}

fn generate_flat_json(count: usize) -> String {
    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let minute = i % 60;
        let hour = (i / 60) % 24;
        records.push(format!(
            r#"{{"id": {i}, "from_id": "user1", "text": "Message number {i}", "date": "2026-01-15T{hour:02}:{minute:02}:00Z", "chat": {{"id": {}}}}}"#,
            i % 4
        ));
    }
    format!("[{}]", records.join(",\n"))
}

/// Overlapping sequences: each shares half its ids with the next.
fn generate_sequences(count: usize, sequences: usize) -> Vec<Vec<Event>> {
    let base_time = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    (0..sequences)
        .map(|s| {
            let start = s * count / 2;
            (start..start + count)
                .map(|i| {
                    let id = i as i64;
                    Event::new(id, 100, base_time + Duration::minutes(id))
                        .with_from_id("user1")
                        .with_text(format!("Message number {i}"))
                })
                .collect()
        })
        .collect()
}

// =============================================================================
// Extraction Benchmarks
// =============================================================================

fn bench_wrapped_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapped_parsing");
    let extractor = Extractor::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let json = generate_wrapped_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let events = extractor
                    .parse_document(black_box(json.as_bytes()), "result.json")
                    .unwrap();
                black_box(events)
            });
        });
    }
    group.finish();
}

fn bench_flat_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_parsing");
    let extractor = Extractor::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let json = generate_flat_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let events = extractor
                    .parse_document(black_box(json.as_bytes()), "events.json")
                    .unwrap();
                black_box(events)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Merge Benchmarks
// =============================================================================

fn bench_merge_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sequences");

    for size in [1_000_usize, 10_000, 100_000] {
        let sequences = generate_sequences(size, 4);
        group.throughput(Throughput::Elements((size * 4) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &sequences,
            |b, sequences| {
                b.iter(|| {
                    let merged = merge_event_sequences(black_box(sequences.clone()));
                    black_box(merged)
                });
            },
        );
    }
    group.finish();
}

fn bench_merge_by_message_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_by_message_id");
    let merger = Merger::with_policy(DedupPolicy::MessageId);

    for size in [1_000_usize, 10_000] {
        let sequences = generate_sequences(size, 4);
        group.throughput(Throughput::Elements((size * 4) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &sequences,
            |b, sequences| {
                b.iter(|| {
                    let merged = merger.merge(black_box(sequences.clone()));
                    black_box(merged)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let extractor = Extractor::new();

    for size in [1_000_usize, 10_000] {
        // Two exports of the same chat, the second a superset of the first
        let first = generate_wrapped_json(size);
        let second = generate_wrapped_json(size * 2);
        group.throughput(Throughput::Elements((size * 3) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(first, second),
            |b, (first, second)| {
                b.iter(|| {
                    let older = extractor.parse_document(black_box(first.as_bytes()), "a.json").unwrap();
                    let newer = extractor.parse_document(black_box(second.as_bytes()), "b.json").unwrap();
                    black_box(Merger::new().merge([older, newer]))
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_wrapped_parsing,
    bench_flat_parsing,
    bench_merge_sequences,
    bench_merge_by_message_id,
    bench_full_pipeline,
);

criterion_main!(benches);
