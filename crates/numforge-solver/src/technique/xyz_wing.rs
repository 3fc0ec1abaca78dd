use numforge_core::{Board, CandidateGrid};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind, xy_wing::cells_with_count};

/// Finds XYZ-Wing patterns.
///
/// A trivalue pivot `{A, B, C}` with two bivalue wings `{A, C}` and
/// `{B, C}`, each sharing a unit with the pivot, eliminates `C` from any
/// cell seeing the pivot and both wings. Unlike the XY-Wing the pivot
/// itself carries `C`, so the elimination zone must cover it too.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzWingDetector;

impl XyzWingDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for XyzWingDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XYZWing
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let shape = board.shape();
        let bivalue = cells_with_count(candidates, 2);
        let mut instances = Vec::new();
        for pivot in candidates.cells_with_count(3) {
            let pivot_mask = candidates.at(pivot.0, pivot.1);
            let wings: ArrayVec<[(u8, u8); 256]> = bivalue
                .iter()
                .copied()
                .filter(|&w| shape.sees(w, pivot))
                .filter(|&w| candidates.at(w.0, w.1).is_subset(pivot_mask))
                .collect();
            for (i, &w1) in wings.iter().enumerate() {
                let m1 = candidates.at(w1.0, w1.1);
                for &w2 in &wings[i + 1..] {
                    let m2 = candidates.at(w2.0, w2.1);
                    let Some(c) = m1.intersection(m2).as_single() else {
                        continue;
                    };
                    let useful = board.positions().any(|cell| {
                        cell != pivot
                            && cell != w1
                            && cell != w2
                            && shape.sees(cell, pivot)
                            && shape.sees(cell, w1)
                            && shape.sees(cell, w2)
                            && candidates.at(cell.0, cell.1).contains(c)
                    });
                    if !useful {
                        continue;
                    }
                    instances.push(TechniqueInstance {
                        kind: TechniqueKind::XYZWing,
                        row: pivot.0,
                        col: pivot.1,
                        description: format!(
                            "XYZ-Wing with pivot r{}c{} removes {c} via wings r{}c{} and r{}c{}",
                            pivot.0 + 1,
                            pivot.1 + 1,
                            w1.0 + 1,
                            w1.1 + 1,
                            w2.0 + 1,
                            w2.1 + 1
                        ),
                    });
                }
            }
        }
        instances
    }
}
