//! Score-targeted clue addition and removal.

use log::{debug, trace};
use numforge_core::Board;
use numforge_solver::{Difficulty, DifficultyRater, DifficultyRating, Solver, TargetComparison};
use rand::{Rng, seq::SliceRandom as _};

use crate::ClueAnalyzer;

/// Result of a refinement run.
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    /// The refined puzzle.
    pub puzzle: Board,
    /// Whether the final score landed in the target class's range. An
    /// inconclusive run is not an error; this flag simply stays `false`.
    pub success: bool,
    /// Number of refinement iterations spent.
    pub iterations: u32,
    /// Rating of the final puzzle, with the target recorded.
    pub rating: DifficultyRating,
}

/// Nudges a puzzle's difficulty into a target band by adding or removing
/// clues.
///
/// Each iteration rates the puzzle and takes one step: when too easy, a
/// clue is removed (from an over-constrained unit first, then the least
/// important clue, then the best removal found by probing every remaining
/// clue); when too hard, a solution value is added back (in an
/// under-constrained unit first, then wherever it reduces the score most).
/// Removals are only accepted when the puzzle keeps a unique solution.
///
/// The loop seeks the band but is not monotone: scores can oscillate
/// around a range boundary, so the iteration cap is the termination
/// guarantee.
#[derive(Debug, Clone)]
pub struct Refiner {
    solver: Solver,
    rater: DifficultyRater,
    analyzer: ClueAnalyzer,
    preserve_symmetry: bool,
    max_iterations: u32,
}

impl Default for Refiner {
    fn default() -> Self {
        Self::new()
    }
}

impl Refiner {
    /// Default iteration cap.
    pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

    /// Creates a refiner with the default thresholds and no symmetry
    /// constraint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            rater: DifficultyRater::new(),
            analyzer: ClueAnalyzer::new(),
            preserve_symmetry: false,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Makes every clue change also apply to the 180° rotational twin.
    #[must_use]
    pub fn with_symmetry(mut self, preserve: bool) -> Self {
        self.preserve_symmetry = preserve;
        self
    }

    /// Overrides the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, cap: u32) -> Self {
        self.max_iterations = cap;
        self
    }

    /// Refines a puzzle toward the target difficulty class.
    ///
    /// `solution` must be the unique completion of `puzzle`; it supplies
    /// the values for clue additions.
    pub fn refine<R: Rng>(
        &self,
        puzzle: &Board,
        solution: &Board,
        target: Difficulty,
        rng: &mut R,
    ) -> RefinementOutcome {
        let mut current = puzzle.clone();
        let mut iterations = 0;
        for iteration in 0..self.max_iterations {
            let rating = self.rater.rate_against(&current, target);
            if rating.is_in_target_range {
                debug!(
                    "refinement hit {target} after {iteration} iterations (score {:.1})",
                    rating.composite_score
                );
                break;
            }
            iterations = iteration + 1;
            let comparison = self
                .rater
                .targets()
                .compare_score(rating.composite_score, target);
            let before = current.clone();
            match comparison {
                TargetComparison::TooEasy => {
                    self.increase_difficulty(&mut current, rng);
                }
                TargetComparison::TooHard => {
                    self.simplify(&mut current, solution);
                }
                TargetComparison::InRange => {}
            }
            trace!(
                "refinement iteration {iteration}: score {:.1}, {comparison:?}, {} clues",
                rating.composite_score,
                current.clue_count()
            );
            if current == before {
                debug!("refinement stalled after {iteration} iterations");
                break;
            }
        }
        let rating = self.rater.rate_against(&current, target);
        RefinementOutcome {
            success: rating.is_in_target_range,
            iterations,
            rating,
            puzzle: current,
        }
    }

    /// Removes one clue (plus its twin under the symmetry option),
    /// preferring over-constrained units, then the least important clue,
    /// then the removal that raises the composite score the most.
    fn increase_difficulty<R: Rng>(&self, board: &mut Board, rng: &mut R) {
        let distribution = self.analyzer.distribution(board);
        let shape = board.shape();
        let mut crowded: Vec<(u8, u8)> = board
            .clues()
            .filter(|&(row, col, _)| distribution.cell_in_over_constrained(shape, row, col))
            .map(|(row, col, _)| (row, col))
            .collect();
        crowded.shuffle(rng);
        for (row, col) in crowded {
            if self.try_remove(board, row, col) {
                return;
            }
        }

        if let Some(&(row, col, _)) = self.analyzer.clues_by_importance(board).first()
            && self.try_remove(board, row, col)
        {
            return;
        }

        // Exhaustive probe: accept the uniqueness-preserving removal that
        // ends up with the highest composite score.
        let mut best: Option<(u8, u8, f64)> = None;
        for (row, col, _) in board.clues().collect::<Vec<_>>() {
            let mut probe = board.clone();
            probe.set(row, col, 0);
            if !self.solver.has_unique_solution(&probe) {
                continue;
            }
            let score = self.rater.rate(&probe).composite_score;
            if best.is_none_or(|(_, _, s)| score > s) {
                best = Some((row, col, score));
            }
        }
        if let Some((row, col, _)) = best {
            let _ = self.try_remove(board, row, col);
        }
    }

    /// Blanks a clue, and its rotational twin when symmetry is preserved.
    /// Reverts and reports `false` when uniqueness would be lost.
    fn try_remove(&self, board: &mut Board, row: u8, col: u8) -> bool {
        let digit = board.get(row, col);
        if digit == 0 {
            return false;
        }
        let last = board.size() - 1;
        let twin = (last - row, last - col);
        let twin_digit = board.get(twin.0, twin.1);
        board.set(row, col, 0);
        if self.preserve_symmetry && twin != (row, col) {
            board.set(twin.0, twin.1, 0);
        }
        if self.solver.has_unique_solution(board) {
            return true;
        }
        board.set(row, col, digit);
        if self.preserve_symmetry && twin != (row, col) {
            board.set(twin.0, twin.1, twin_digit);
        }
        false
    }

    /// Adds back one solution value (plus its twin under the symmetry
    /// option), preferring under-constrained units, then the addition that
    /// lowers the composite score the most.
    fn simplify(&self, board: &mut Board, solution: &Board) {
        let distribution = self.analyzer.distribution(board);
        let shape = board.shape();
        let sparse = board
            .empty_cells()
            .find(|&(row, col)| distribution.cell_in_under_constrained(shape, row, col));
        let target_cell = sparse.or_else(|| {
            self.analyzer
                .candidate_clue_additions(board, solution)
                .first()
                .map(|&(row, col, _)| (row, col))
        });
        if let Some((row, col)) = target_cell {
            self.add_with_twin(board, solution, row, col);
        }
    }

    fn add_with_twin(&self, board: &mut Board, solution: &Board, row: u8, col: u8) {
        board.set(row, col, solution.get(row, col));
        if self.preserve_symmetry {
            let last = board.size() - 1;
            let twin = (last - row, last - col);
            if board.get(twin.0, twin.1) == 0 {
                board.set(twin.0, twin.1, solution.get(twin.0, twin.1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    const UNIQUE_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    fn setup() -> (Board, Board) {
        let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
        let solution = Solver::new().solve(&puzzle).unwrap();
        (puzzle, solution)
    }

    #[test]
    fn test_refined_puzzle_stays_unique() {
        let (puzzle, solution) = setup();
        let mut rng = Pcg64::seed_from_u64(7);
        let outcome = Refiner::new().refine(&puzzle, &solution, Difficulty::Hard, &mut rng);
        assert!(Solver::new().has_unique_solution(&outcome.puzzle));
    }

    #[test]
    fn test_refinement_records_target() {
        let (puzzle, solution) = setup();
        let mut rng = Pcg64::seed_from_u64(7);
        let outcome = Refiner::new().refine(&puzzle, &solution, Difficulty::Medium, &mut rng);
        assert_eq!(outcome.rating.target, Some(Difficulty::Medium));
        assert_eq!(outcome.success, outcome.rating.is_in_target_range);
        assert!(outcome.iterations < Refiner::DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_in_range_puzzle_stops_immediately() {
        let (puzzle, solution) = setup();
        let rater = DifficultyRater::new();
        let target = rater.rate(&puzzle).estimated;
        let mut rng = Pcg64::seed_from_u64(7);
        let outcome = Refiner::new().refine(&puzzle, &solution, target, &mut rng);
        assert!(outcome.success);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.puzzle, puzzle);
    }

    #[test]
    fn test_simplify_moves_toward_easier() {
        // Against an Easy target the refiner should add clues, never
        // remove them.
        let (puzzle, solution) = setup();
        let mut rng = Pcg64::seed_from_u64(3);
        let outcome = Refiner::new().refine(&puzzle, &solution, Difficulty::Easy, &mut rng);
        assert!(outcome.puzzle.clue_count() >= puzzle.clue_count());
        for (row, col, digit) in outcome.puzzle.clues() {
            assert_eq!(solution.get(row, col), digit);
        }
    }

    #[test]
    fn test_symmetric_refinement_preserves_twins() {
        let (_, solution) = setup();
        // Start from a rotationally symmetric puzzle: the full solution.
        let mut rng = Pcg64::seed_from_u64(11);
        let refiner = Refiner::new().with_symmetry(true);
        let outcome = refiner.refine(&solution, &solution, Difficulty::Medium, &mut rng);
        let board = &outcome.puzzle;
        let last = board.size() - 1;
        for (row, col, _) in board.clues() {
            assert_ne!(
                board.get(last - row, last - col),
                0,
                "clue at ({row},{col}) has no twin"
            );
        }
    }

    #[test]
    fn test_iteration_cap_respected() {
        let (puzzle, solution) = setup();
        let mut rng = Pcg64::seed_from_u64(5);
        let refiner = Refiner::new().with_max_iterations(3);
        let outcome = refiner.refine(&puzzle, &solution, Difficulty::Evil, &mut rng);
        assert!(outcome.iterations <= 3);
    }
}
