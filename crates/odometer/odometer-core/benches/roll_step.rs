use criterion::{black_box, criterion_group, criterion_main, Criterion};
use odometer_core::{Config, RollEngine, Sampling};

fn run_once(cfg: &Config, from: &str, to: &str) -> usize {
    let mut eng = RollEngine::new(cfg.clone()).expect("valid config");
    eng.set_numbers(from, to).expect("digits");
    eng.start_animation();
    let mut frames = 0;
    while eng.update(16.0).animating {
        frames += 1;
    }
    frames
}

fn bench_roll(c: &mut Criterion) {
    let grid = Config::default();
    let per_column = Config {
        sampling: Sampling::PerColumn,
        ..Config::default()
    };

    c.bench_function("roll_12_digits_grid", |b| {
        b.iter(|| run_once(&grid, black_box("987654321098"), black_box("123456789012")))
    });
    c.bench_function("roll_12_digits_per_column", |b| {
        b.iter(|| run_once(&per_column, black_box("987654321098"), black_box("123456789012")))
    });
    c.bench_function("roll_shrink_vanishing", |b| {
        b.iter(|| run_once(&grid, black_box("99999999"), black_box("1")))
    });
}

criterion_group!(benches, bench_roll);
criterion_main!(benches);
