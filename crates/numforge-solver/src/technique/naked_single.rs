use numforge_core::{Board, CandidateGrid};

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds cells whose candidate mask holds exactly one digit.
///
/// A naked single is always useful: placing the digit is forced.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingleDetector;

impl NakedSingleDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for NakedSingleDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedSingle
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, _board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        candidates
            .cells_with_count(1)
            .map(|(row, col)| {
                let digit = candidates.at(row, col).first().unwrap();
                TechniqueInstance {
                    kind: TechniqueKind::NakedSingle,
                    row,
                    col,
                    description: format!(
                        "{digit} is the only candidate at r{}c{}",
                        row + 1,
                        col + 1
                    ),
                }
            })
            .collect()
    }
}
