//! Merkle Red-Black Tree Performance Benchmarks
//!
//! Measures the cost of the core operations under realistic access
//! patterns:
//!
//! - **Insertion**: building a map from shuffled keys, which exercises the
//!   balancing fix-ups and the digest recomputation walk together.
//! - **Lookup**: plain lookups and authenticated lookups (proof
//!   construction), which differ by the path-collection cost.
//! - **Verification**: checking a proof with nothing but the root digest.
//! - **Change sets**: diffing two trees whose difference is much smaller
//!   than their size, the case the digest pruning is designed for.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench --bench tree_ops
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mrbt::{verify, MerkleRbTree};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;

const TREE_SIZE: u64 = 10_000;

fn shuffled_keys(rng: &mut StdRng) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..TREE_SIZE).collect();
    keys.shuffle(rng);
    keys
}

fn build_tree(keys: &[u64]) -> MerkleRbTree<u64> {
    let mut tree = MerkleRbTree::new();
    for &key in keys {
        tree.insert(key, key.to_string().into_bytes());
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let keys = shuffled_keys(&mut rng);
    c.bench_function("insert_10k_shuffled", |b| {
        b.iter_batched(
            || keys.clone(),
            |keys| black_box(build_tree(&keys)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_lookup_and_prove(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let keys = shuffled_keys(&mut rng);
    let tree = build_tree(&keys);
    let probes: Vec<u64> = keys.iter().step_by(37).copied().collect();

    c.bench_function("get", |b| {
        b.iter(|| {
            for key in &probes {
                black_box(tree.get(key));
            }
        });
    });

    c.bench_function("prove", |b| {
        b.iter(|| {
            for key in &probes {
                black_box(tree.prove(key));
            }
        });
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let keys = shuffled_keys(&mut rng);
    let tree = build_tree(&keys);
    let root = tree.digest();
    let proofs: Vec<_> = keys.iter().step_by(37).map(|key| tree.prove(key)).collect();

    c.bench_function("verify", |b| {
        b.iter(|| {
            for vo in &proofs {
                assert!(verify(black_box(&root), vo, tree.hasher()));
            }
        });
    });
}

fn bench_change_set(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(4);
    let keys = shuffled_keys(&mut rng);
    let tree = build_tree(&keys);
    let mut diverged = tree.clone();
    for key in keys.iter().step_by(100) {
        diverged.set(*key, b"changed".to_vec());
    }

    c.bench_function("change_set_1pct", |b| {
        b.iter(|| black_box(tree.get_change_set(&diverged)));
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup_and_prove,
    bench_verify,
    bench_change_set
);
criterion_main!(benches);
