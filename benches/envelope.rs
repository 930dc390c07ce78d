//! Envelope codec benchmark suite.
//!
//! Benchmarks JSON wire encode/decode at different payload sizes.
//!
//! Run with: cargo bench --bench envelope
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};

use lime_ws::Envelope;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const ITEM_COUNTS: &[usize] = &[1, 32, 256];

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds a message-shaped envelope with `items` entries in its content.
fn sample_envelope(items: usize) -> Envelope {
    let content: Vec<Value> = (0..items)
        .map(|i| json!({"index": i, "text": format!("item-{i}")}))
        .collect();

    Envelope::new(json!({
        "id": "bench",
        "to": "postmaster@host.example",
        "type": "application/json",
        "content": content,
    }))
}

// ============================================================================
// Benchmark: Encode
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_encode");

    for &items in ITEM_COUNTS {
        let envelope = sample_envelope(items);
        group.bench_with_input(BenchmarkId::new("to_wire", items), &envelope, |b, e| {
            b.iter(|| black_box(e).to_wire().expect("serialize"));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Decode
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_decode");

    for &items in ITEM_COUNTS {
        let wire = sample_envelope(items).to_wire().expect("serialize");
        group.bench_with_input(BenchmarkId::new("from_wire", items), &wire, |b, w| {
            b.iter(|| Envelope::from_wire(black_box(w)).expect("parse"));
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Setup
// ============================================================================

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
