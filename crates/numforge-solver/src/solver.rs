//! Backtracking solver with unit propagation and effort metrics.

use numforge_core::{Board, ConstraintMasks};

use crate::{SolverMetrics, SolverResult};

/// A depth-first Sudoku solver with unit propagation.
///
/// Each recursive level first runs a propagation fixpoint (placing every
/// cell whose candidate mask is a singleton), then branches on the most
/// constrained remaining cell, trying candidates in ascending order. The
/// working board is mutated in place and restored from an undo trail on
/// backtrack, so no per-level allocation is needed beyond the trail itself.
///
/// The solver never panics on inconsistent input: an unsatisfiable puzzle
/// yields a result with a solution count of 0 and accurate metrics.
///
/// # Examples
///
/// ```
/// # use std::str::FromStr as _;
/// # use numforge_core::Board;
/// # use numforge_solver::Solver;
/// let puzzle = Board::from_str(
///     "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
/// )
/// .unwrap();
/// let solver = Solver::new();
/// assert!(solver.has_unique_solution(&puzzle));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    /// Creates a solver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the first solution of a puzzle, if one exists.
    #[must_use]
    pub fn solve(&self, puzzle: &Board) -> Option<Board> {
        self.solve_with_metrics(puzzle).into_solution()
    }

    /// Solves a puzzle, returning the full result with effort metrics.
    #[must_use]
    pub fn solve_with_metrics(&self, puzzle: &Board) -> SolverResult {
        self.count_solutions_with_metrics(puzzle, 1)
    }

    /// Counts solutions up to `limit`, discarding metrics.
    #[must_use]
    pub fn count_solutions(&self, puzzle: &Board, limit: u32) -> u32 {
        self.count_solutions_with_metrics(puzzle, limit)
            .solution_count()
    }

    /// Counts solutions up to `limit`, returning the full result.
    ///
    /// Enumeration stops as soon as `limit` solutions have been seen, so a
    /// returned count equal to `limit` means "`limit` or more". The first
    /// solution found is snapshotted into the result.
    #[must_use]
    pub fn count_solutions_with_metrics(&self, puzzle: &Board, limit: u32) -> SolverResult {
        let mut metrics = SolverMetrics::new();
        let mut search = Search {
            limit: limit.max(1),
            count: 0,
            first: None,
            metrics: &mut metrics,
        };
        let mut work = puzzle.clone();
        search.run(&mut work, 0);
        let (first, count) = (search.first, search.count);
        SolverResult::new(first, count, metrics)
    }

    /// Returns `true` if the puzzle has exactly one completion.
    #[must_use]
    pub fn has_unique_solution(&self, puzzle: &Board) -> bool {
        self.count_solutions(puzzle, 2) == 1
    }
}

struct Search<'a> {
    limit: u32,
    count: u32,
    first: Option<Board>,
    metrics: &'a mut SolverMetrics,
}

impl Search<'_> {
    /// One recursive level. Returns `true` when the solution limit has been
    /// reached and enumeration should unwind.
    fn run(&mut self, board: &mut Board, depth: u32) -> bool {
        self.metrics.enter(depth);
        let done = self.run_inner(board, depth);
        self.metrics.leave(depth);
        done
    }

    fn run_inner(&mut self, board: &mut Board, depth: u32) -> bool {
        let mut masks = ConstraintMasks::from_board(board);
        let mut trail: Vec<(u8, u8, u8)> = Vec::new();

        // Propagation fixpoint: place forced digits until a pass assigns
        // nothing. An empty candidate mask on an empty cell is a dead end.
        self.metrics.record_propagation_cycle();
        loop {
            let mut assigned = false;
            let mut dead = false;
            'pass: for (row, col) in board.positions() {
                if board.get(row, col) != 0 {
                    continue;
                }
                let candidates = masks.candidates(row, col);
                if candidates.is_empty() {
                    dead = true;
                    break 'pass;
                }
                if let Some(digit) = candidates.as_single() {
                    board.set(row, col, digit);
                    masks.place(row, col, digit);
                    trail.push((row, col, digit));
                    assigned = true;
                }
            }
            if dead {
                Self::unwind(board, &mut masks, &trail);
                return false;
            }
            if !assigned {
                break;
            }
        }

        if board.is_complete() {
            if self.first.is_none() {
                self.first = Some(board.clone());
            }
            self.count += 1;
            let done = self.count >= self.limit;
            Self::unwind(board, &mut masks, &trail);
            return done;
        }

        // Branch on the most constrained cell, row-major tie-break. The
        // propagation loop has removed every singleton, so the candidate
        // count here is at least 2.
        let mut best: Option<(u8, u8, usize)> = None;
        for (row, col) in board.positions() {
            if board.get(row, col) != 0 {
                continue;
            }
            let n = masks.candidates(row, col).len();
            if best.is_none_or(|(_, _, m)| n < m) {
                best = Some((row, col, n));
                if n == 2 {
                    break;
                }
            }
        }
        let Some((row, col, _)) = best else {
            // No empty cell and not complete cannot happen; treat as dead end.
            Self::unwind(board, &mut masks, &trail);
            return false;
        };
        self.metrics.record_guess();

        for digit in masks.candidates(row, col) {
            board.set(row, col, digit);
            masks.place(row, col, digit);
            let done = self.run(board, depth + 1);
            board.set(row, col, 0);
            masks.unplace(row, col, digit);
            if done {
                Self::unwind(board, &mut masks, &trail);
                return true;
            }
        }

        Self::unwind(board, &mut masks, &trail);
        false
    }

    fn unwind(board: &mut Board, masks: &mut ConstraintMasks, trail: &[(u8, u8, u8)]) {
        for &(row, col, digit) in trail.iter().rev() {
            board.set(row, col, 0);
            masks.unplace(row, col, digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use numforge_core::{Shape, validate_units};

    use super::*;

    const UNIQUE_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const UNIQUE_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    mod solving {
        use super::*;

        #[test]
        fn test_unique_puzzle_solve() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let result = Solver::new().count_solutions_with_metrics(&puzzle, 2);
            assert_eq!(result.solution_count(), 1);
            assert_eq!(result.solution().unwrap().to_text(), UNIQUE_SOLUTION);
        }

        #[test]
        fn test_solution_is_consistent() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let solution = Solver::new().solve(&puzzle).unwrap();
            assert!(solution.is_complete());
            assert!(validate_units(&solution).is_valid());
        }

        #[test]
        fn test_solution_extends_puzzle() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let solution = Solver::new().solve(&puzzle).unwrap();
            for (row, col, digit) in puzzle.clues() {
                assert_eq!(solution.get(row, col), digit);
            }
        }

        #[test]
        fn test_empty_board_is_satisfiable() {
            let board = Board::empty(Shape::CLASSIC);
            let solution = Solver::new().solve(&board).unwrap();
            assert!(solution.is_complete());
            assert!(validate_units(&solution).is_valid());
        }

        #[test]
        fn test_solves_small_and_rectangular_shapes() {
            for (size, rows, cols) in [(4, 2, 2), (6, 2, 3)] {
                let board = Board::empty(Shape::new(size, rows, cols).unwrap());
                let solution = Solver::new().solve(&board).unwrap();
                assert!(solution.is_complete());
                assert!(validate_units(&solution).is_valid());
            }
        }

        #[test]
        fn test_unsatisfiable_returns_zero_count() {
            // Two 1s pinned into the same row.
            let mut board = Board::empty(Shape::CLASSIC);
            board.set(0, 0, 1);
            board.set(0, 8, 1);
            let result = Solver::new().solve_with_metrics(&board);
            assert_eq!(result.solution_count(), 0);
            assert!(result.solution().is_none());
            assert!(result.metrics().iterations() >= 1);
        }

        #[test]
        fn test_completed_board_solves_immediately() {
            let solved = Board::from_str(UNIQUE_SOLUTION).unwrap();
            let result = Solver::new().solve_with_metrics(&solved);
            assert_eq!(result.solution_count(), 1);
            assert_eq!(result.metrics().iterations(), 1);
            assert_eq!(result.metrics().guesses(), 0);
            assert_eq!(result.metrics().max_backtrack_depth(), 0);
        }
    }

    mod counting {
        use super::*;

        #[test]
        fn test_unique_solution_detected() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            assert!(Solver::new().has_unique_solution(&puzzle));
        }

        #[test]
        fn test_ambiguous_board_counts_two() {
            // An empty board admits many completions; counting with limit 2
            // must stop at 2.
            let board = Board::empty(Shape::CLASSIC);
            assert_eq!(Solver::new().count_solutions(&board, 2), 2);
            assert!(!Solver::new().has_unique_solution(&board));
        }

        #[test]
        fn test_limit_caps_enumeration() {
            let board = Board::empty(Shape::new(4, 2, 2).unwrap());
            // A 4x4 grid has 288 completions; the limit caps the count.
            assert_eq!(Solver::new().count_solutions(&board, 5), 5);
            assert_eq!(Solver::new().count_solutions(&board, 288), 288);
            assert_eq!(Solver::new().count_solutions(&board, 300), 288);
        }

        #[test]
        fn test_count_restores_input() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let copy = puzzle.clone();
            let _ = Solver::new().count_solutions(&puzzle, 2);
            assert_eq!(puzzle, copy);
        }
    }

    mod metrics {
        use super::*;

        #[test]
        fn test_result_score_matches_metrics_recomputation() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let result = Solver::new().solve_with_metrics(&puzzle);
            let m = result.metrics();
            assert!((result.difficulty_score() - m.composite_score()).abs() < 1e-9);
        }

        #[test]
        fn test_propagation_cycles_match_iterations() {
            // Exactly one propagation cycle is recorded per recursive entry.
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let result = Solver::new().solve_with_metrics(&puzzle);
            assert_eq!(
                result.metrics().propagation_cycles(),
                result.metrics().iterations()
            );
        }

        #[test]
        fn test_guesses_bounded_by_iterations() {
            let board = Board::empty(Shape::CLASSIC);
            let result = Solver::new().solve_with_metrics(&board);
            assert!(result.metrics().guesses() <= result.metrics().iterations());
        }

        #[test]
        fn test_blank_recovery_roundtrip() {
            // Solve, then blank the puzzle's empty positions out of the
            // solution; the solver must recover the same completion.
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let solver = Solver::new();
            let solution = solver.solve(&puzzle).unwrap();
            let mut reblanked = solution.clone();
            for (row, col) in puzzle.positions() {
                if puzzle.get(row, col) == 0 {
                    reblanked.set(row, col, 0);
                }
            }
            assert_eq!(reblanked, puzzle);
            assert_eq!(solver.solve(&reblanked).unwrap(), solution);
        }
    }
}
