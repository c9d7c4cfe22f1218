use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_qrgen::encoder::capacity::select;
use rust_qrgen::encoder::function_patterns::function_matrix;
use rust_qrgen::encoder::mask::{choose_mask, penalty_score};
use rust_qrgen::encoder::placement::place_codewords;
use rust_qrgen::encoder::{bitstream, reed_solomon};
use rust_qrgen::{ECLevel, EncodeOptions, ModuleMatrix};

fn placed_matrix(len: usize) -> (ModuleMatrix, ECLevel) {
    let data: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    let selection = select(&data, &EncodeOptions::new(ECLevel::M)).unwrap();
    let spec = &selection.spec;
    let codewords = bitstream::encode_segments(&selection.segments, spec).unwrap();
    let codewords = reed_solomon::add_error_correction(&codewords, spec).unwrap();
    let mut matrix = function_matrix(spec.version);
    place_codewords(&mut matrix, &codewords).unwrap();
    (matrix, spec.ec_level)
}

fn bench_penalty_score(c: &mut Criterion) {
    let (matrix, _) = placed_matrix(1500);
    c.bench_function("penalty_score_large", |b| b.iter(|| penalty_score(black_box(&matrix))));
}

fn bench_choose_mask(c: &mut Criterion) {
    let (matrix, level) = placed_matrix(1500);
    c.bench_function("choose_mask_sequential", |b| {
        b.iter(|| choose_mask(black_box(&matrix), level, None, false))
    });
    c.bench_function("choose_mask_parallel", |b| {
        b.iter(|| choose_mask(black_box(&matrix), level, None, true))
    });
}

criterion_group!(benches, bench_penalty_score, bench_choose_mask);
criterion_main!(benches);
