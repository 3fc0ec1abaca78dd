//! Composite difficulty rating.

use numforge_core::{Board, CandidateGrid};

use crate::{
    Difficulty, DifficultyTargets, Solver, TargetComparison,
    technique::{self, TechniqueInstance},
};

/// Full difficulty assessment of one puzzle.
///
/// Combines the raw solver effort counters, the detected human techniques,
/// and the composite score with its classification. The `target` and
/// `is_in_target_range` fields are populated when the rating was produced
/// against a requested difficulty.
#[derive(Debug, Clone)]
pub struct DifficultyRating {
    /// Number of filled cells.
    pub clue_count: usize,
    /// Number of empty cells.
    pub empty_cells: usize,
    /// Solver iterations used to solve the puzzle.
    pub iterations: u64,
    /// Deepest backtrack level reached.
    pub max_backtrack_depth: u32,
    /// Branching decisions taken.
    pub guesses: u64,
    /// Propagation cycles run.
    pub propagation_cycles: u64,
    /// Aggregated technique score.
    pub technique_score: f64,
    /// Every useful technique occurrence found on the initial position.
    pub techniques: Vec<TechniqueInstance>,
    /// The weighted composite score.
    pub composite_score: f64,
    /// Class implied by the composite score.
    pub estimated: Difficulty,
    /// Classification band: scores near a range edge widen the estimate to
    /// the neighbouring class.
    pub estimated_range: Option<(Difficulty, Difficulty)>,
    /// The requested difficulty, when rating against a target.
    pub target: Option<Difficulty>,
    /// Whether the composite score landed in the target class's range.
    pub is_in_target_range: bool,
}

/// Rates puzzles by solver effort and detected techniques.
///
/// # Examples
///
/// ```
/// # use std::str::FromStr as _;
/// # use numforge_core::Board;
/// # use numforge_solver::DifficultyRater;
/// let puzzle = Board::from_str(
///     "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
/// )
/// .unwrap();
/// let rating = DifficultyRater::new().rate(&puzzle);
/// assert_eq!(rating.clue_count, 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DifficultyRater {
    solver: Solver,
    targets: DifficultyTargets,
}

impl DifficultyRater {
    /// Creates a rater with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rater with custom thresholds.
    #[must_use]
    pub fn with_targets(targets: DifficultyTargets) -> Self {
        Self {
            solver: Solver::new(),
            targets,
        }
    }

    /// Returns the threshold tables in use.
    #[must_use]
    pub fn targets(&self) -> &DifficultyTargets {
        &self.targets
    }

    /// Rates a puzzle.
    #[must_use]
    pub fn rate(&self, puzzle: &Board) -> DifficultyRating {
        self.rate_inner(puzzle, None)
    }

    /// Rates a puzzle and records whether it lands in the target class.
    #[must_use]
    pub fn rate_against(&self, puzzle: &Board, target: Difficulty) -> DifficultyRating {
        self.rate_inner(puzzle, Some(target))
    }

    /// Classifies a composite score without a full rating.
    #[must_use]
    pub fn classify_score(&self, score: f64) -> Difficulty {
        self.targets.classify_by_score(score)
    }

    /// Compares a composite score against a target class.
    #[must_use]
    pub fn compare_to_target(&self, score: f64, target: Difficulty) -> TargetComparison {
        self.targets.compare_score(score, target)
    }

    #[expect(clippy::cast_precision_loss)]
    fn rate_inner(&self, puzzle: &Board, target: Option<Difficulty>) -> DifficultyRating {
        let clue_count = puzzle.clue_count();
        let empty_cells = puzzle.empty_count();

        let result = self.solver.solve_with_metrics(puzzle);
        let metrics = result.metrics();

        let candidates = CandidateGrid::from_board(puzzle);
        let techniques = technique::detect_all(puzzle, &candidates);
        let technique_score = technique::technique_score(&techniques);

        let clue_ratio = clue_count as f64 / (clue_count + empty_cells) as f64;
        let composite_score = 0.40 * metrics.iterations() as f64
            + 0.20 * (2.0 * technique_score)
            + 0.15 * (2.0 * f64::from(metrics.max_backtrack_depth()))
            + 0.15 * (3.0 * metrics.guesses() as f64)
            + 0.10 * (20.0 * (1.0 - clue_ratio));

        let estimated = self.targets.classify_by_score(composite_score);
        let estimated_range = Some(self.classification_band(composite_score, estimated));
        let is_in_target_range =
            target.is_some_and(|t| self.targets.score_in_class(composite_score, t));

        DifficultyRating {
            clue_count,
            empty_cells,
            iterations: metrics.iterations(),
            max_backtrack_depth: metrics.max_backtrack_depth(),
            guesses: metrics.guesses(),
            propagation_cycles: metrics.propagation_cycles(),
            technique_score,
            techniques,
            composite_score,
            estimated,
            estimated_range,
            target,
            is_in_target_range,
        }
    }

    /// Widens a classification to a (min, max) band when the score sits in
    /// the outer 20% of its class range. The top class has no finite width;
    /// its band check uses a nominal width equal to its lower bound.
    fn classification_band(&self, score: f64, estimated: Difficulty) -> (Difficulty, Difficulty) {
        let (lo, hi) = self.targets.class(estimated).scores;
        let width = if hi.is_finite() { hi - lo } else { lo };
        let mut min = estimated;
        let mut max = estimated;
        if score < lo + 0.2 * width
            && let Some(easier) = estimated.easier()
        {
            min = easier;
        }
        if hi.is_finite()
            && score > hi - 0.2 * width
            && let Some(harder) = estimated.harder()
        {
            max = harder;
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    const UNIQUE_PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    fn rated() -> DifficultyRating {
        let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
        DifficultyRater::new().rate(&puzzle)
    }

    #[test]
    fn test_counts() {
        let rating = rated();
        assert_eq!(rating.clue_count, 30);
        assert_eq!(rating.empty_cells, 51);
    }

    #[test]
    fn test_score_recomputes_from_parts() {
        let rating = rated();
        #[expect(clippy::cast_precision_loss)]
        let expected = 0.40 * rating.iterations as f64
            + 0.20 * (2.0 * rating.technique_score)
            + 0.15 * (2.0 * f64::from(rating.max_backtrack_depth))
            + 0.15 * (3.0 * rating.guesses as f64)
            + 0.10
                * (20.0
                    * (1.0
                        - rating.clue_count as f64
                            / (rating.clue_count + rating.empty_cells) as f64));
        assert!((rating.composite_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_matches_score_classification() {
        let rating = rated();
        let targets = DifficultyTargets::new();
        assert_eq!(targets.classify_by_score(rating.composite_score), rating.estimated);
        let (min, max) = rating.estimated_range.unwrap();
        assert!(min <= rating.estimated && rating.estimated <= max);
    }

    #[test]
    fn test_rate_against_sets_target() {
        let puzzle = Board::from_str(UNIQUE_PUZZLE).unwrap();
        let rater = DifficultyRater::new();
        let rating = rater.rate_against(&puzzle, Difficulty::Evil);
        assert_eq!(rating.target, Some(Difficulty::Evil));
        // The scenario puzzle is far from Evil.
        assert!(!rating.is_in_target_range);
        let matching = rater.rate_against(&puzzle, rating.estimated);
        assert!(matching.is_in_target_range);
    }

    #[test]
    fn test_plain_rate_has_no_target() {
        let rating = rated();
        assert_eq!(rating.target, None);
        assert!(!rating.is_in_target_range);
    }

    #[test]
    fn test_band_widens_at_range_edges() {
        let rater = DifficultyRater::new();
        // 8.5 sits in the bottom 20% of Medium's [8, 20) range.
        assert_eq!(
            rater.classification_band(8.5, Difficulty::Medium),
            (Difficulty::Easy, Difficulty::Medium)
        );
        // 19.5 sits in the top 20%.
        assert_eq!(
            rater.classification_band(19.5, Difficulty::Medium),
            (Difficulty::Medium, Difficulty::Hard)
        );
        // 14 is comfortably inside.
        assert_eq!(
            rater.classification_band(14.0, Difficulty::Medium),
            (Difficulty::Medium, Difficulty::Medium)
        );
        // Easy has no class below; Evil has none above.
        assert_eq!(
            rater.classification_band(0.5, Difficulty::Easy),
            (Difficulty::Easy, Difficulty::Easy)
        );
        assert_eq!(
            rater.classification_band(260.0, Difficulty::Evil),
            (Difficulty::Expert, Difficulty::Evil)
        );
    }

    #[test]
    fn test_techniques_feed_score() {
        let rating = rated();
        // The scenario puzzle opens with singles at least.
        assert!(!rating.techniques.is_empty());
        assert!(rating.technique_score > 0.0);
    }
}
