use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prefix_coder::{PrefixCode, PrefixCoder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_text(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| {
            let r: f64 = rng.gen();
            b' ' + (r * r * 90.0) as u8
        })
        .collect()
}

fn bench_generate_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_generate_code");
    for size in [1_000, 100_000, 1_000_000].iter() {
        let text = generate_text(*size);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| PrefixCoder::from_bytes(black_box(text)))
        });
    }
    group.finish();
}

fn bench_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_codec");
    for size in [1_000, 100_000].iter() {
        let text = generate_text(*size);
        let coder = PrefixCoder::from_bytes(&text);
        let encoded = coder.encode(&text).unwrap();
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| coder.encode(black_box(text)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, bits| {
            b.iter(|| coder.decode(black_box(bits)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_code, bench_encode_decode);
criterion_main!(benches);
