use numforge_core::{Board, CandidateGrid, Unit};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds two digits confined to the same two cells of a unit.
///
/// The pattern only eliminates something when at least one of the two cells
/// carries a third candidate, so pairs of plain bivalue cells are skipped
/// (those are naked pairs, not hidden ones).
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenPairDetector;

impl HiddenPairDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for HiddenPairDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenPair
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let shape = board.shape();
        let size = shape.size();
        let mut instances = Vec::new();
        for unit in Unit::all(size) {
            // Positions of every digit within the unit, by cell index.
            let mut positions: [ArrayVec<[u8; 16]>; 16] = Default::default();
            for (i, (row, col)) in unit.cells(shape).enumerate() {
                for digit in candidates.at(row, col) {
                    positions[digit as usize - 1].push(u8::try_from(i).unwrap());
                }
            }
            for a in 1..=size {
                if positions[a as usize - 1].len() != 2 {
                    continue;
                }
                for b in (a + 1)..=size {
                    if positions[b as usize - 1] != positions[a as usize - 1] {
                        continue;
                    }
                    let cells: ArrayVec<[(u8, u8); 2]> = positions[a as usize - 1]
                        .iter()
                        .map(|&i| unit.cells(shape).nth(i as usize).unwrap())
                        .collect();
                    let extra = cells
                        .iter()
                        .any(|&(row, col)| candidates.at(row, col).len() > 2);
                    if !extra {
                        continue;
                    }
                    instances.push(TechniqueInstance {
                        kind: TechniqueKind::HiddenPair,
                        row: cells[0].0,
                        col: cells[0].1,
                        description: format!(
                            "{a} and {b} only fit at r{}c{} and r{}c{}",
                            cells[0].0 + 1,
                            cells[0].1 + 1,
                            cells[1].0 + 1,
                            cells[1].1 + 1
                        ),
                    });
                }
            }
        }
        instances
    }
}
