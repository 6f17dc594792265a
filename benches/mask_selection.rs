use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_qrgen::encoder::mask::{evaluate_all, penalty, select_best};
use rust_qrgen::{EcLevel, EncodeOptions, Plan};

fn unmasked(text: &str, ec_level: EcLevel) -> rust_qrgen::ModuleGrid {
    Plan::for_text(text, &EncodeOptions::new(ec_level))
        .expect("fits")
        .unmasked_grid()
}

fn bench_penalty(c: &mut Criterion) {
    let grid = unmasked(&"0123456789".repeat(100), EcLevel::M);
    c.bench_function("penalty_single_grid", |b| b.iter(|| penalty(black_box(&grid))));
}

fn bench_select_small(c: &mut Criterion) {
    let grid = unmasked("HELLO WORLD", EcLevel::Q);
    c.bench_function("select_best_v1", |b| {
        b.iter(|| select_best(black_box(&grid), EcLevel::Q))
    });
}

fn bench_select_large(c: &mut Criterion) {
    let grid = unmasked(&"z".repeat(2000), EcLevel::L);
    c.bench_function("evaluate_all_large", |b| {
        b.iter(|| evaluate_all(black_box(&grid), EcLevel::L))
    });
}

criterion_group!(benches, bench_penalty, bench_select_small, bench_select_large);
criterion_main!(benches);
