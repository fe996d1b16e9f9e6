//! Micro-benchmark for `SparseBitVector::rank1`.
//!
//! Compares rank1 cost across a range of densities, from the
//! highly-conserved columns typical of real alignments (very few runs) to
//! pathological all-distinct columns (one run per row).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use succinct_msa::bits::{BitVector, SparseBitVector};

fn generate_run_heads(len: usize, run_count: usize, seed: u64) -> BitVector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bits = BitVector::zeroed(len);
    bits.set(0);

    let mut remaining = run_count.saturating_sub(1);
    for i in 1..len {
        if remaining == 0 {
            break;
        }
        if rng.gen_bool(remaining as f64 / (len - i) as f64) {
            bits.set(i);
            remaining -= 1;
        }
    }
    bits
}

fn bench_rank1(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_rank1");

    for len in [10_000usize, 100_000, 1_000_000] {
        for run_count in [8usize, 64, len / 10] {
            let dense = generate_run_heads(len, run_count.max(1), 42);
            let sparse = SparseBitVector::build(&dense);

            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let queries: Vec<usize> = (0..10_000).map(|_| rng.gen_range(0..=len)).collect();

            group.bench_with_input(
                BenchmarkId::new(format!("len={len}"), run_count),
                &queries,
                |b, queries| {
                    b.iter(|| {
                        for &q in queries {
                            black_box(sparse.rank1(q));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_rank1);
criterion_main!(benches);
