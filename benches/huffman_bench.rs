use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use huffpack::{compress_bytes, decompress_bytes, CodingTrie};

fn sample_text(len: usize) -> Vec<u8> {
    let words = ["the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog. "];
    words.iter().cycle().flat_map(|w| w.bytes()).take(len).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut freqs = [0u64; 256];
    for (i, f) in freqs.iter_mut().enumerate() {
        *f = (i as u64 * 2654435761) % 1000 + 1;
    }
    c.bench_function("build_full_alphabet", |b| {
        b.iter(|| CodingTrie::from_frequencies(&freqs))
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("container");
    let input = sample_text(64 * 1024);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("compress", |b| b.iter(|| compress_bytes(&input).unwrap()));

    let packed = compress_bytes(&input).unwrap();
    group.bench_function("decompress", |b| {
        b.iter(|| decompress_bytes(&packed).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_roundtrip);
criterion_main!(benches);
