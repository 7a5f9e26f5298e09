//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use qconsensus::{ConsensusCaller, ReadAlignment};

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Deterministic pseudo-random alignment with mostly agreeing reads.
fn synthetic_alignment(len: usize, depth: usize) -> ReadAlignment {
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let truth: Vec<u8> = (0..len).map(|_| BASES[(next() % 4) as usize]).collect();
    let bases = Array2::from_shape_fn((len, depth), |(position, _)| {
        if next() % 20 == 0 {
            BASES[(next() % 4) as usize]
        } else {
            truth[position]
        }
    });
    let qualities = Array2::from_shape_fn((len, depth), |_| 10.0 + (next() % 30) as f64);
    ReadAlignment::new(bases, qualities).expect("shapes match")
}

fn benchmark_consensus(c: &mut Criterion) {
    let caller = ConsensusCaller::dna();
    let mut group = c.benchmark_group("call");

    for depth in [2, 10, 50] {
        let alignment = synthetic_alignment(10_000, depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &alignment, |b, alignment| {
            b.iter(|| black_box(caller.call(alignment).expect("valid alignment")));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_consensus);
criterion_main!(benches);
