//! Benchmarks for puzzle generation.
//!
//! # Benchmarks
//!
//! - **`generate`**: The whole pipeline (seed, carve, rate) per difficulty
//!   class on the classic 9×9 shape.
//! - **`generate_refined`**: The pipeline with score-targeted refinement.
//!
//! Fixed seeds keep runs reproducible while covering distinct carve
//! orders.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use numforge_core::Shape;
use numforge_generator::{Generator, Variant};
use numforge_solver::Difficulty;

const SEEDS: [u64; 3] = [0x00c0_ffee, 0xdead_beef, 0x1234_5678];

fn bench_generate(c: &mut Criterion) {
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        for seed in SEEDS {
            c.bench_with_input(
                BenchmarkId::new(format!("generate_{difficulty}"), seed),
                &seed,
                |b, &seed| {
                    b.iter(|| {
                        Generator::with_seed(hint::black_box(seed))
                            .generate(difficulty, Variant::Classic, Shape::CLASSIC, false)
                            .unwrap()
                    });
                },
            );
        }
    }
}

fn bench_generate_refined(c: &mut Criterion) {
    for seed in SEEDS {
        c.bench_with_input(
            BenchmarkId::new("generate_refined_hard", seed),
            &seed,
            |b, &seed| {
                b.iter(|| {
                    Generator::with_seed(hint::black_box(seed))
                        .generate(Difficulty::Hard, Variant::Classic, Shape::CLASSIC, true)
                        .unwrap()
                });
            },
        );
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10).measurement_time(Duration::from_secs(20));
    targets = bench_generate, bench_generate_refined
);
criterion_main!(benches);
