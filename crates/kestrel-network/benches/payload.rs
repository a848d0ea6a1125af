use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kestrel_network::{BlockHash, Payload, Transaction};

fn get_blocks(n: usize) -> Payload {
    Payload::GetBlocks(
        (0..n)
            .map(|i| BlockHash::from([(i % 251) as u8; 32]))
            .collect(),
    )
}

fn memory_pool(n: usize) -> Payload {
    Payload::MemoryPool((0..n).map(|i| Transaction::new(vec![i as u8; 250])).collect())
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for n in [1usize, 100, 1000] {
        let blocks = get_blocks(n);
        group.bench_with_input(BenchmarkId::new("getBlocks", n), &blocks, |b, p| {
            b.iter(|| black_box(p).to_bytes())
        });
        let pool = memory_pool(n);
        group.bench_with_input(BenchmarkId::new("memoryPool", n), &pool, |b, p| {
            b.iter(|| black_box(p).to_bytes())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for n in [1usize, 100, 1000] {
        let blocks = get_blocks(n).to_bytes();
        group.bench_with_input(BenchmarkId::new("getBlocks", n), &blocks, |b, bytes| {
            b.iter(|| Payload::from_bytes(black_box(bytes)))
        });
        let pool = memory_pool(n).to_bytes();
        group.bench_with_input(BenchmarkId::new("memoryPool", n), &pool, |b, bytes| {
            b.iter(|| Payload::from_bytes(black_box(bytes)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
