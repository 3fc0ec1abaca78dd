//! Clue distribution and per-clue importance analysis.

use numforge_core::{Board, Shape, Unit};
use numforge_solver::{DifficultyRater, Solver};

/// Per-unit clue counts with over/under-constrained flags.
///
/// A unit is flagged when its clue count deviates from the mean over all
/// units by more than one standard deviation.
#[derive(Debug, Clone)]
pub struct ClueDistribution {
    /// Clue count per row.
    pub rows: Vec<usize>,
    /// Clue count per column.
    pub columns: Vec<usize>,
    /// Clue count per box.
    pub boxes: Vec<usize>,
    /// Mean clue count over all units.
    pub average: f64,
    /// Population variance of the unit clue counts.
    pub variance: f64,
    /// Units holding notably many clues.
    pub over_constrained: Vec<Unit>,
    /// Units holding notably few clues.
    pub under_constrained: Vec<Unit>,
}

impl ClueDistribution {
    /// Returns `true` if the cell lies in any under-constrained unit.
    #[must_use]
    pub fn cell_in_under_constrained(&self, shape: Shape, row: u8, col: u8) -> bool {
        self.under_constrained
            .iter()
            .any(|unit| unit.contains(shape, row, col))
    }

    /// Returns `true` if the cell lies in any over-constrained unit.
    #[must_use]
    pub fn cell_in_over_constrained(&self, shape: Shape, row: u8, col: u8) -> bool {
        self.over_constrained
            .iter()
            .any(|unit| unit.contains(shape, row, col))
    }
}

/// Analyzes how clues are spread over a puzzle and how much each one
/// contributes to its difficulty.
///
/// Importance probing re-solves and re-rates the puzzle with single clues
/// removed or added, so the per-clue operations cost one rating each.
#[derive(Debug, Clone, Default)]
pub struct ClueAnalyzer {
    solver: Solver,
    rater: DifficultyRater,
}

impl ClueAnalyzer {
    /// Creates an analyzer with default rating thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Span of composite-score delta that maps onto the importance range.
    const IMPORTANCE_SCORE_SPAN: f64 = 50.0;
    /// Importance bonus for clues sitting in an under-constrained unit.
    const UNDER_CONSTRAINED_BONUS: f64 = 0.2;

    /// Computes the clue distribution of a board.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn distribution(&self, board: &Board) -> ClueDistribution {
        let shape = board.shape();
        let size = shape.size();
        let count_unit = |unit: Unit| {
            unit.cells(shape)
                .filter(|&(row, col)| board.get(row, col) != 0)
                .count()
        };
        let rows: Vec<usize> = (0..size).map(|i| count_unit(Unit::Row(i))).collect();
        let columns: Vec<usize> = (0..size).map(|i| count_unit(Unit::Column(i))).collect();
        let boxes: Vec<usize> = (0..size).map(|i| count_unit(Unit::Box(i))).collect();

        let all_counts: Vec<usize> = rows
            .iter()
            .chain(columns.iter())
            .chain(boxes.iter())
            .copied()
            .collect();
        let n = all_counts.len() as f64;
        let average = all_counts.iter().sum::<usize>() as f64 / n;
        let variance = all_counts
            .iter()
            .map(|&c| {
                let d = c as f64 - average;
                d * d
            })
            .sum::<f64>()
            / n;
        let stddev = variance.sqrt();

        let mut over_constrained = Vec::new();
        let mut under_constrained = Vec::new();
        for (unit, &count) in Unit::all(size).zip(all_counts.iter()) {
            if count as f64 > average + stddev {
                over_constrained.push(unit);
            } else if (count as f64) < average - stddev {
                under_constrained.push(unit);
            }
        }

        ClueDistribution {
            rows,
            columns,
            boxes,
            average,
            variance,
            over_constrained,
            under_constrained,
        }
    }

    /// Scores how important one clue is to the puzzle, in `[0, 1]`.
    ///
    /// A clue whose removal destroys uniqueness scores 1.0. Otherwise the
    /// score is the normalized composite-score increase its removal would
    /// cause, plus a bonus when the cell sits in an under-constrained unit.
    /// Empty cells score 0.
    #[must_use]
    pub fn importance(&self, puzzle: &Board, row: u8, col: u8) -> f64 {
        let digit = puzzle.get(row, col);
        if digit == 0 {
            return 0.0;
        }
        let mut without = puzzle.clone();
        without.set(row, col, 0);
        if !self.solver.has_unique_solution(&without) {
            return 1.0;
        }
        let base = self.rater.rate(puzzle).composite_score;
        let removed = self.rater.rate(&without).composite_score;
        let delta = (removed - base).max(0.0);
        let mut importance = (delta / Self::IMPORTANCE_SCORE_SPAN).clamp(0.0, 0.8);
        if self
            .distribution(puzzle)
            .cell_in_under_constrained(puzzle.shape(), row, col)
        {
            importance += Self::UNDER_CONSTRAINED_BONUS;
        }
        importance.clamp(0.0, 1.0)
    }

    /// Returns every clue position with its importance, least important
    /// first.
    #[must_use]
    pub fn clues_by_importance(&self, puzzle: &Board) -> Vec<(u8, u8, f64)> {
        let mut clues: Vec<(u8, u8, f64)> = puzzle
            .clues()
            .map(|(row, col, _)| (row, col, self.importance(puzzle, row, col)))
            .collect();
        clues.sort_by(|a, b| a.2.total_cmp(&b.2));
        clues
    }

    /// Returns the empty positions ordered by how much filling in their
    /// solution value would reduce the composite score, largest reduction
    /// first.
    #[must_use]
    pub fn candidate_clue_additions(
        &self,
        puzzle: &Board,
        solution: &Board,
    ) -> Vec<(u8, u8, f64)> {
        let base = self.rater.rate(puzzle).composite_score;
        let mut additions: Vec<(u8, u8, f64)> = puzzle
            .empty_cells()
            .map(|(row, col)| {
                let mut with = puzzle.clone();
                with.set(row, col, solution.get(row, col));
                let reduction = base - self.rater.rate(&with).composite_score;
                (row, col, reduction)
            })
            .collect();
        additions.sort_by(|a, b| b.2.total_cmp(&a.2));
        additions
    }

    /// Pairs every cell with its 180° rotational twin, emitting each pair
    /// once. On odd-sided boards the center cell is its own twin and is not
    /// emitted.
    #[must_use]
    pub fn rotational_symmetry_pairs(shape: Shape) -> Vec<((u8, u8), (u8, u8))> {
        let last = shape.size() - 1;
        let mut pairs = Vec::with_capacity(shape.cell_count() / 2);
        for row in 0..shape.size() {
            for col in 0..shape.size() {
                let twin = (last - row, last - col);
                if (row, col) < twin {
                    pairs.push(((row, col), twin));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    const UNIQUE_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    mod distribution {
        use super::*;

        #[test]
        fn test_counts_per_unit() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let dist = ClueAnalyzer::new().distribution(&puzzle);
            assert_eq!(dist.rows, vec![3, 4, 3, 3, 4, 3, 3, 4, 3]);
            assert_eq!(dist.rows.iter().sum::<usize>(), 30);
            assert_eq!(dist.columns.iter().sum::<usize>(), 30);
            assert_eq!(dist.boxes.iter().sum::<usize>(), 30);
            assert!((dist.average - 30.0 / 9.0).abs() < 1e-9);
        }

        #[test]
        fn test_flags_deviating_units() {
            let mut board = Board::empty(Shape::CLASSIC);
            // Load row 0 heavily; everything else stays nearly empty.
            for col in 0..8 {
                board.set(0, col, col + 1);
            }
            let dist = ClueAnalyzer::new().distribution(&board);
            assert!(dist.over_constrained.contains(&Unit::Row(0)));
            assert!(!dist.under_constrained.contains(&Unit::Row(0)));
        }

        #[test]
        fn test_uniform_board_flags_nothing() {
            let board = Board::empty(Shape::CLASSIC);
            let dist = ClueAnalyzer::new().distribution(&board);
            assert!(dist.over_constrained.is_empty());
            assert!(dist.under_constrained.is_empty());
            assert!((dist.variance).abs() < 1e-9);
        }
    }

    mod importance {
        use super::*;

        #[test]
        fn test_empty_cell_scores_zero() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let analyzer = ClueAnalyzer::new();
            assert!((analyzer.importance(&puzzle, 0, 2)).abs() < 1e-9);
        }

        #[test]
        fn test_uniqueness_breaking_clue_scores_one() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let analyzer = ClueAnalyzer::new();
            let solver = Solver::new();
            // Find a clue whose removal breaks uniqueness; the scenario
            // puzzle is minimal enough to contain several.
            let breaking = puzzle.clues().find(|&(row, col, _)| {
                let mut without = puzzle.clone();
                without.set(row, col, 0);
                !solver.has_unique_solution(&without)
            });
            if let Some((row, col, _)) = breaking {
                assert!((analyzer.importance(&puzzle, row, col) - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn test_importance_in_unit_interval() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let analyzer = ClueAnalyzer::new();
            for (row, col, _) in puzzle.clues().take(5) {
                let importance = analyzer.importance(&puzzle, row, col);
                assert!((0.0..=1.0).contains(&importance));
            }
        }

        #[test]
        fn test_clues_by_importance_is_ascending() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let ordered = ClueAnalyzer::new().clues_by_importance(&puzzle);
            assert_eq!(ordered.len(), 30);
            for pair in ordered.windows(2) {
                assert!(pair[0].2 <= pair[1].2);
            }
        }

        #[test]
        fn test_candidate_additions_is_descending() {
            let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
            let analyzer = ClueAnalyzer::new();
            let solution = Solver::new().solve(&puzzle).unwrap();
            let additions = analyzer.candidate_clue_additions(&puzzle, &solution);
            assert_eq!(additions.len(), 51);
            for pair in additions.windows(2) {
                assert!(pair[0].2 >= pair[1].2);
            }
        }
    }

    mod pairs {
        use super::*;

        #[test]
        fn test_rotational_pairs_cover_board_once() {
            let shape = Shape::CLASSIC;
            let pairs = ClueAnalyzer::rotational_symmetry_pairs(shape);
            // 81 cells minus the center, in pairs.
            assert_eq!(pairs.len(), 40);
            for &((r1, c1), (r2, c2)) in &pairs {
                assert_eq!((8 - r1, 8 - c1), (r2, c2));
            }
            assert!(!pairs.iter().any(|&(a, b)| a == b));
        }

        #[test]
        fn test_even_board_pairs_all_cells() {
            let shape = Shape::new(4, 2, 2).unwrap();
            let pairs = ClueAnalyzer::rotational_symmetry_pairs(shape);
            assert_eq!(pairs.len(), 8);
        }
    }
}
