//! Puzzle generation with unique solutions and targetable difficulty.
//!
//! # Overview
//!
//! The generator carves puzzles out of completed grids:
//!
//! 1. **Seed a solution.** The boxes along the main diagonal share no unit,
//!    so each is filled with an independent random permutation; the solver
//!    completes the rest of the grid.
//! 2. **Carve.** Cell positions are visited in a shuffled order and blanked
//!    one at a time; a removal only stands if the puzzle keeps a unique
//!    solution. Carving stops at the difficulty profile's clue target.
//! 3. **Analyze.** The finished puzzle is validated, rated, and checked for
//!    clue symmetry, then packaged with its solution and metadata.
//!
//! With refinement enabled, a [`Refiner`] then nudges the carved puzzle's
//! composite score into the target class's band by adding and removing
//! clues.
//!
//! Generation is reproducible: the same seed with the same difficulty,
//! variant, and shape produces the same puzzle. Independent generators can
//! run in parallel, one seed each, sharing only the [`Statistics`]
//! aggregator.
//!
//! # Examples
//!
//! ```no_run
//! use numforge_core::Shape;
//! use numforge_generator::{Generator, Variant};
//! use numforge_solver::Difficulty;
//!
//! let generator = Generator::with_seed(42);
//! let puzzle = generator.generate(Difficulty::Medium, Variant::Classic, Shape::CLASSIC, false)?;
//!
//! println!("puzzle {}", puzzle.fingerprint());
//! println!("{:#}", puzzle.puzzle);
//! # Ok::<(), numforge_generator::GenerationError>(())
//! ```

use std::time::SystemTime;

use log::debug;
use numforge_core::{Board, Shape, validate_units};
use numforge_solver::{Difficulty, DifficultyRater, DifficultyRating, Solver};
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

pub use self::{
    analysis::{ClueAnalyzer, ClueDistribution},
    batch::{GeneratorConfig, distribute},
    refiner::{RefinementOutcome, Refiner},
    stats::{ClassSummary, PuzzleRecord, Statistics},
    symmetry::SymmetryInfo,
};

mod analysis;
mod batch;
mod refiner;
mod stats;
mod symmetry;

/// Name of the solving algorithm stamped on generated puzzles.
pub const SOLVER_NAME: &str = "backtracking+propagation";

/// Rule variant tag carried on a generated puzzle.
///
/// Generation and rating always apply the classical row/column/box rules;
/// the tag tells rendering collaborators which decoration to apply. Under
/// the extra variant constraints the emitted puzzle is therefore not
/// guaranteed unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Classical rules only.
    #[default]
    Classic,
    /// Rendered with marked main diagonals.
    Diagonal,
    /// Rendered with colored cages.
    ColorConstrained,
}

impl Variant {
    /// Returns the display name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Diagonal => "diagonal",
            Self::ColorConstrained => "color-constrained",
        }
    }
}

/// Error raised when generation exhausts its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("puzzle generation failed after {attempts} attempts")]
pub struct GenerationError {
    /// Number of whole-pipeline attempts made.
    pub attempts: u32,
}

/// A finished puzzle with its solution, rating, and provenance.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    /// The puzzle grid handed to the solver.
    pub puzzle: Board,
    /// The unique completion of the puzzle.
    pub solution: Board,
    /// The difficulty class the puzzle was generated for.
    pub difficulty: Difficulty,
    /// Rule variant tag for rendering.
    pub variant: Variant,
    /// The seed that reproduces this puzzle.
    pub seed: Option<u64>,
    /// Wall-clock time of generation.
    pub created_at: SystemTime,
    /// Name of the solving algorithm used.
    pub solver_name: &'static str,
    /// Position of the puzzle within its batch; 0 outside batches.
    pub number: u64,
    /// Full difficulty rating of the final puzzle.
    pub rating: DifficultyRating,
    /// Clue-position symmetry of the final puzzle.
    pub symmetry: SymmetryInfo,
    /// Refinement iterations spent; 0 when refinement was off.
    pub refinement_iterations: u32,
}

impl GeneratedPuzzle {
    /// Returns a stable hex fingerprint of the puzzle grid.
    ///
    /// Batch tooling uses this to deduplicate and to reference puzzles
    /// without carrying the whole grid.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update([self.puzzle.size()]);
        for (row, col) in self.puzzle.positions() {
            hasher.update([self.puzzle.get(row, col)]);
        }
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Generates puzzles with unique solutions at a requested difficulty.
///
/// See the [crate documentation](crate) for the pipeline. A generator is
/// cheap to construct and stateless between calls; seeding is per
/// generator, so batches derive one seed per puzzle.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    solver: Solver,
    rater: DifficultyRater,
    seed: Option<u64>,
}

impl Generator {
    /// Attempts at completing a seeded grid before the pipeline retries.
    const SOLUTION_ATTEMPTS: u32 = 50;
    /// Whole-pipeline attempts before generation fails.
    const PIPELINE_ATTEMPTS: u32 = 100;

    /// Creates an unseeded generator; every call draws a fresh seed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that always starts from the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Generates one puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the pipeline exhausts its retry
    /// budget, which only happens on pathological shapes.
    pub fn generate(
        &self,
        difficulty: Difficulty,
        variant: Variant,
        shape: Shape,
        use_refinement: bool,
    ) -> Result<GeneratedPuzzle, GenerationError> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg64::seed_from_u64(seed);
        for attempt in 0..Self::PIPELINE_ATTEMPTS {
            let Some(solution) = self.seed_solution(shape, &mut rng) else {
                debug!("attempt {attempt}: seeding failed, retrying");
                continue;
            };
            let target_clues = Self::target_clue_count(shape, difficulty);
            let puzzle = self.carve(&solution, target_clues, &mut rng);
            if !validate_units(&puzzle).is_valid() {
                debug!("attempt {attempt}: carved puzzle failed validation, retrying");
                continue;
            }

            let (puzzle, rating, refinement_iterations) = if use_refinement {
                let outcome =
                    Refiner::new().refine(&puzzle, &solution, difficulty, &mut rng);
                (outcome.puzzle, outcome.rating, outcome.iterations)
            } else {
                let rating = self.rater.rate_against(&puzzle, difficulty);
                (puzzle, rating, 0)
            };

            let symmetry = SymmetryInfo::detect(&puzzle);
            debug!(
                "generated {} puzzle with {} clues (score {:.1}) on attempt {attempt}",
                difficulty,
                puzzle.clue_count(),
                rating.composite_score
            );
            return Ok(GeneratedPuzzle {
                puzzle,
                solution,
                difficulty,
                variant,
                seed: Some(seed),
                created_at: SystemTime::now(),
                solver_name: SOLVER_NAME,
                number: 0,
                rating,
                symmetry,
                refinement_iterations,
            });
        }
        Err(GenerationError {
            attempts: Self::PIPELINE_ATTEMPTS,
        })
    }

    /// Builds a complete solution grid: fills the diagonal boxes with
    /// independent random permutations, then lets the solver finish.
    fn seed_solution<R: Rng>(&self, shape: Shape, rng: &mut R) -> Option<Board> {
        let size = shape.size();
        let boxes_down = size / shape.box_rows();
        let boxes_across = size / shape.box_cols();
        let diagonal_boxes = boxes_down.min(boxes_across);
        for _ in 0..Self::SOLUTION_ATTEMPTS {
            let mut board = Board::empty(shape);
            let mut digits: Vec<u8> = (1..=size).collect();
            for i in 0..diagonal_boxes {
                digits.shuffle(rng);
                let box_index = i * boxes_across + i;
                for ((row, col), &digit) in board.box_cells(box_index).zip(digits.iter()) {
                    board.set(row, col, digit);
                }
            }
            if let Some(solution) = self.solver.solve(&board) {
                return Some(solution);
            }
        }
        None
    }

    /// Fraction of cells kept as clues per difficulty class.
    fn clue_fraction(difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => 0.49,
            Difficulty::Medium => 0.39,
            Difficulty::Hard => 0.32,
            Difficulty::Expert => 0.25,
            Difficulty::Evil => 0.21,
        }
    }

    /// Minimum clue count for a classical 9×9 puzzle with a unique
    /// solution.
    const MIN_CLUES_9X9: usize = 17;

    fn target_clue_count(shape: Shape, difficulty: Difficulty) -> usize {
        #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut target =
            (Self::clue_fraction(difficulty) * shape.cell_count() as f64).floor() as usize;
        if shape.size() == 9 {
            target = target.max(Self::MIN_CLUES_9X9);
        }
        target
    }

    /// Blanks cells in a shuffled order, keeping every removal that leaves
    /// the puzzle uniquely solvable, until the clue target is reached or
    /// every position has been tried.
    fn carve<R: Rng>(&self, solution: &Board, target_clues: usize, rng: &mut R) -> Board {
        let mut puzzle = solution.clone();
        let mut positions: Vec<(u8, u8)> = solution.positions().collect();
        positions.shuffle(rng);
        for (row, col) in positions {
            if puzzle.clue_count() <= target_clues {
                break;
            }
            let digit = puzzle.get(row, col);
            puzzle.set(row, col, 0);
            if !self.solver.has_unique_solution(&puzzle) {
                puzzle.set(row, col, digit);
            }
        }
        puzzle
    }
}
