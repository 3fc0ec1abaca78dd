//! Benchmarks for solving and rating.
//!
//! # Benchmarks
//!
//! - **`solve`**: Full solve of fixed puzzles across the difficulty span.
//! - **`count_two`**: The uniqueness probe (`count_solutions` with limit 2),
//!   the hot operation of the carving loop.
//! - **`rate`**: Full composite rating including technique detection.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, str::FromStr as _};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use numforge_core::Board;
use numforge_solver::{DifficultyRater, Solver};

const PUZZLES: [(&str, &str); 3] = [
    (
        "easy",
        "534678912672195348198342567859761423426853791713924856961537284287419635345286170",
    ),
    (
        "medium",
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
    ),
    (
        "hard",
        "400000805030000000000700000020000060000080400000010000000603070500200000104000000",
    ),
];

fn bench_solve(c: &mut Criterion) {
    let solver = Solver::new();
    for (name, text) in PUZZLES {
        let puzzle = Board::from_str(text).unwrap();
        c.bench_with_input(BenchmarkId::new("solve", name), &puzzle, |b, puzzle| {
            b.iter(|| solver.solve_with_metrics(hint::black_box(puzzle)));
        });
    }
}

fn bench_count_two(c: &mut Criterion) {
    let solver = Solver::new();
    for (name, text) in PUZZLES {
        let puzzle = Board::from_str(text).unwrap();
        c.bench_with_input(BenchmarkId::new("count_two", name), &puzzle, |b, puzzle| {
            b.iter(|| solver.count_solutions(hint::black_box(puzzle), 2));
        });
    }
}

fn bench_rate(c: &mut Criterion) {
    let rater = DifficultyRater::new();
    for (name, text) in PUZZLES {
        let puzzle = Board::from_str(text).unwrap();
        c.bench_with_input(BenchmarkId::new("rate", name), &puzzle, |b, puzzle| {
            b.iter(|| rater.rate(hint::black_box(puzzle)));
        });
    }
}

criterion_group!(benches, bench_solve, bench_count_two, bench_rate);
criterion_main!(benches);
