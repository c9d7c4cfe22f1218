use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_qrgen::{ECLevel, EncodeOptions, Segmentation, encode, encode_with_options};

fn bench_encode_short(c: &mut Criterion) {
    c.bench_function("encode_hello_world_q", |b| {
        b.iter(|| encode(black_box(b"HELLO WORLD"), black_box(ECLevel::Q), 1))
    });
}

fn bench_encode_url(c: &mut Criterion) {
    let url = b"https://example.com/products/item?id=000123456789&ref=QRGEN";
    c.bench_function("encode_url_m", |b| {
        b.iter(|| encode(black_box(url), black_box(ECLevel::M), 1))
    });
}

fn bench_encode_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_bytes_l");
    for len in [100usize, 500, 1000, 2953] {
        let data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| encode(black_box(data), ECLevel::L, 1))
        });
    }
    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mixed = b"Order 12345678901234 shipped to DOCK-7, tracking ABC123456789XYZ at 2026-10-19";
    let mut group = c.benchmark_group("segmentation");
    for (name, policy) in [("greedy", Segmentation::Greedy), ("optimal", Segmentation::Optimal)] {
        let options = EncodeOptions::new(ECLevel::M).segmentation(policy);
        group.bench_function(name, |b| {
            b.iter(|| encode_with_options(black_box(mixed), &options))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode_short,
    bench_encode_url,
    bench_encode_sizes,
    bench_segmentation
);
criterion_main!(benches);
