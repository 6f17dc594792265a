use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_qrgen::{EcLevel, EncodeOptions, Strategy, encode_with};

fn bench_encode_short_url(c: &mut Criterion) {
    let options = EncodeOptions::new(EcLevel::M);
    c.bench_function("encode_short_url", |b| {
        b.iter(|| encode_with(black_box("https://example.com/qr"), &options))
    });
}

fn bench_encode_numeric_v10(c: &mut Criterion) {
    let digits = "0123456789".repeat(40);
    let options = EncodeOptions::new(EcLevel::Q);
    c.bench_function("encode_numeric_400_digits", |b| {
        b.iter(|| encode_with(black_box(&digits), &options))
    });
}

fn bench_encode_max_byte(c: &mut Criterion) {
    let text = "a".repeat(1273);
    let options = EncodeOptions::new(EcLevel::H);
    c.bench_function("encode_byte_v40_h", |b| {
        b.iter(|| encode_with(black_box(&text), &options))
    });
}

fn bench_segmentation_strategies(c: &mut Criterion) {
    let text = "Order 12345678 shipped to ZONE-7 on 2024-01-01, ref abc".repeat(8);
    let optimal = EncodeOptions::new(EcLevel::M).with_strategy(Strategy::Optimal);
    let runs = EncodeOptions::new(EcLevel::M).with_strategy(Strategy::Runs);
    c.bench_function("encode_mixed_optimal", |b| {
        b.iter(|| encode_with(black_box(&text), &optimal))
    });
    c.bench_function("encode_mixed_runs", |b| {
        b.iter(|| encode_with(black_box(&text), &runs))
    });
}

criterion_group!(
    benches,
    bench_encode_short_url,
    bench_encode_numeric_v10,
    bench_encode_max_byte,
    bench_segmentation_strategies
);
criterion_main!(benches);
