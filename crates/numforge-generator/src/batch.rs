//! Batch planning: difficulty distribution and the typed option set.

use numforge_core::Shape;
use numforge_solver::Difficulty;

use crate::Variant;

/// Expands an ordered difficulty list into a per-puzzle plan of `count`
/// entries.
///
/// A single difficulty repeats for the whole batch. Longer lists cycle in
/// groups of two, so a trailing partial group biases toward the earlier
/// difficulties.
///
/// # Examples
///
/// ```
/// # use numforge_generator::distribute;
/// # use numforge_solver::Difficulty::{Easy, Hard, Medium};
/// assert_eq!(distribute(&[Easy, Medium], 5), vec![Easy, Easy, Medium, Medium, Easy]);
/// assert_eq!(
///     distribute(&[Easy, Medium, Hard], 9),
///     vec![Easy, Easy, Medium, Medium, Hard, Hard, Easy, Easy, Medium]
/// );
/// ```
#[must_use]
pub fn distribute(difficulties: &[Difficulty], count: usize) -> Vec<Difficulty> {
    if difficulties.is_empty() {
        return vec![Difficulty::Medium; count];
    }
    if difficulties.len() == 1 {
        return vec![difficulties[0]; count];
    }
    (0..count)
        .map(|i| difficulties[(i / 2) % difficulties.len()])
        .collect()
}

/// The options a caller hands to a generation batch.
///
/// The command-line front-end fills this from flags; callers embedding the
/// engine construct it directly. Options the engine does not understand
/// simply do not exist here, so they are dropped at the boundary.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Board geometry of every puzzle in the batch.
    pub shape: Shape,
    /// Ordered difficulty classes; expanded by [`distribute`].
    pub difficulties: Vec<Difficulty>,
    /// Variant tag stamped on the puzzles (generation itself is classical).
    pub variant: Variant,
    /// Number of puzzles to generate.
    pub count: usize,
    /// Base seed; each puzzle derives its own from it. Absent means a
    /// fresh random batch.
    pub seed: Option<u64>,
    /// Whether to run score-targeted refinement after carving.
    pub use_refinement: bool,
    /// Whether output writers should include the solution grid.
    pub include_solution: bool,
    /// Whether output writers should include a per-cell candidate sheet.
    pub include_solving_sheet: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shape: Shape::CLASSIC,
            difficulties: vec![Difficulty::Medium],
            variant: Variant::Classic,
            count: 1,
            seed: None,
            use_refinement: false,
            include_solution: true,
            include_solving_sheet: false,
        }
    }
}

impl GeneratorConfig {
    /// Returns the per-puzzle difficulty plan for this configuration.
    #[must_use]
    pub fn plan(&self) -> Vec<Difficulty> {
        distribute(&self.difficulties, self.count)
    }
}
