//! Solving, technique detection, and difficulty rating.
//!
//! # Overview
//!
//! This crate layers three concerns on top of the core grid types:
//!
//! 1. [`Solver`]: a depth-first search with unit propagation that solves
//!    puzzles, counts solutions up to a limit, and records effort metrics
//!    ([`SolverMetrics`]) as it goes
//! 2. [`technique`]: pure detectors for eight named human techniques,
//!    reporting every useful occurrence on a position
//! 3. [`DifficultyRater`]: a composite rating combining solver effort,
//!    technique findings, and clue density, classified against the
//!    [`DifficultyTargets`] threshold tables
//!
//! The metrics contract is load-bearing: the rater recomputes composite
//! scores from the individual counters, so the solver records exactly one
//! propagation cycle per recursive entry and counts a guess only when the
//! branch cell had more than one candidate.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr as _;
//!
//! use numforge_core::Board;
//! use numforge_solver::{DifficultyRater, Solver};
//!
//! let puzzle = Board::from_str(
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
//! )
//! .unwrap();
//!
//! let solver = Solver::new();
//! assert!(solver.has_unique_solution(&puzzle));
//!
//! let rating = DifficultyRater::new().rate(&puzzle);
//! println!("{} ({:.1})", rating.estimated, rating.composite_score);
//! ```

pub use self::{
    metrics::{SolverMetrics, SolverResult},
    rater::{DifficultyRater, DifficultyRating},
    solver::Solver,
    targets::{
        ClassTargets, Difficulty, DifficultyTargets, TargetComparison, UnknownDifficulty,
        parse_difficulty_list,
    },
};

mod metrics;
mod rater;
mod solver;
pub mod technique;
mod targets;
