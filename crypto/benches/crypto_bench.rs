use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merit_types::Digest;

fn blake2b_384_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_384_256B", |b| {
        b.iter(|| merit_crypto::blake2b_384(black_box(&data)))
    });
}

fn merkle_root_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_root");
    for count in [1usize, 16, 256, 1024] {
        let leaves: Vec<Digest> = (0..count as u32)
            .map(|i| merit_crypto::blake2b_384(&i.to_be_bytes()))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &leaves, |b, leaves| {
            b.iter(|| merit_crypto::merkle_root(black_box(leaves)))
        });
    }
    group.finish();
}

fn holder_key_bench(c: &mut Criterion) {
    c.bench_function("holder_key_from_seed", |b| {
        b.iter(|| merit_crypto::holder_key_from_seed(black_box(b"bench-seed")))
    });
}

criterion_group!(benches, blake2b_384_bench, merkle_root_bench, holder_key_bench);
criterion_main!(benches);
