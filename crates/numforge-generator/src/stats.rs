//! Batch generation statistics.

use std::sync::Mutex;

use numforge_solver::Difficulty;

/// One per-puzzle record appended after a generation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleRecord {
    /// The requested difficulty class.
    pub target: Difficulty,
    /// The class the finished puzzle rated as.
    pub actual: Difficulty,
    /// Solver iterations of the final rating.
    pub iterations: u64,
    /// Composite score of the final rating.
    pub composite_score: f64,
    /// Clue count of the finished puzzle.
    pub clue_count: usize,
    /// Whether the final rating landed in the target class.
    pub matched: bool,
    /// Refinement iterations spent (0 when refinement was off).
    pub refinement_iterations: u32,
    /// Branching decisions of the final rating.
    pub guesses: u64,
    /// Deepest backtrack level of the final rating.
    pub max_backtrack_depth: u32,
}

impl PuzzleRecord {
    /// Builds the record for a finished generation.
    #[must_use]
    pub fn from_generated(puzzle: &crate::GeneratedPuzzle) -> Self {
        Self {
            target: puzzle.difficulty,
            actual: puzzle.rating.estimated,
            iterations: puzzle.rating.iterations,
            composite_score: puzzle.rating.composite_score,
            clue_count: puzzle.rating.clue_count,
            matched: puzzle.rating.is_in_target_range,
            refinement_iterations: puzzle.refinement_iterations,
            guesses: puzzle.rating.guesses,
            max_backtrack_depth: puzzle.rating.max_backtrack_depth,
        }
    }
}

/// Aggregate numbers for one difficulty class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassSummary {
    /// Number of puzzles recorded for the class.
    pub count: usize,
    /// Mean solver iterations.
    pub mean_iterations: f64,
    /// Sample standard deviation of solver iterations.
    pub stddev_iterations: f64,
    /// Fraction of puzzles whose rating matched the target.
    pub success_rate: f64,
    /// Mean composite score.
    pub mean_score: f64,
    /// Mean clue count.
    pub mean_clue_count: f64,
}

/// Append-only aggregator of per-puzzle records.
///
/// The record list sits behind a mutex so parallel generators can share one
/// aggregator; appends from different producers are unordered. Summaries
/// are computed on demand.
#[derive(Debug, Default)]
pub struct Statistics {
    records: Mutex<Vec<PuzzleRecord>>,
}

impl Statistics {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, record: PuzzleRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Returns the number of records appended so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summarizes the records targeting one difficulty class.
    ///
    /// Returns `None` when no record targets the class.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn class_summary(&self, target: Difficulty) -> Option<ClassSummary> {
        let records = self.records.lock().unwrap();
        let class: Vec<&PuzzleRecord> = records.iter().filter(|r| r.target == target).collect();
        if class.is_empty() {
            return None;
        }
        let count = class.len();
        let n = count as f64;
        let mean_iterations = class.iter().map(|r| r.iterations as f64).sum::<f64>() / n;
        let stddev_iterations = if count < 2 {
            0.0
        } else {
            let sum_sq = class
                .iter()
                .map(|r| {
                    let d = r.iterations as f64 - mean_iterations;
                    d * d
                })
                .sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        };
        let success_rate = class.iter().filter(|r| r.matched).count() as f64 / n;
        let mean_score = class.iter().map(|r| r.composite_score).sum::<f64>() / n;
        let mean_clue_count = class.iter().map(|r| r.clue_count as f64).sum::<f64>() / n;
        Some(ClassSummary {
            count,
            mean_iterations,
            stddev_iterations,
            success_rate,
            mean_score,
            mean_clue_count,
        })
    }
}
