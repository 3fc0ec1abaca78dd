use numforge_core::{Board, CandidateGrid, DigitSet};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind, x_wing::line_positions};

/// Finds Swordfish patterns: three rows whose candidate positions for a
/// digit cover exactly three columns between them (or the column mirror).
///
/// Each participating line must hold the digit in two or three cells; the
/// pattern is useful when some other line carries the digit in one of the
/// three covered cross-lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwordfishDetector;

impl SwordfishDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn scan(
    candidates: &CandidateGrid,
    by_rows: bool,
    digit: u8,
    instances: &mut Vec<TechniqueInstance>,
) {
    let size = candidates.shape().size();
    let mut bases: ArrayVec<[(u8, DigitSet); 16]> = ArrayVec::new();
    for i in 0..size {
        let positions = line_positions(candidates, by_rows, i, digit);
        if matches!(positions.len(), 2 | 3) {
            // Cross-line indices packed into a set; index j maps to bit j.
            let cover = positions.iter().map(|&j| j + 1).collect::<DigitSet>();
            bases.push((i, cover));
        }
    }
    for (a, &(i1, c1)) in bases.iter().enumerate() {
        for (b, &(i2, c2)) in bases.iter().enumerate().skip(a + 1) {
            for &(i3, c3) in &bases[b + 1..] {
                let cover = c1 | c2 | c3;
                if cover.len() != 3 {
                    continue;
                }
                let useful = (0..size).any(|other| {
                    other != i1
                        && other != i2
                        && other != i3
                        && line_positions(candidates, by_rows, other, digit)
                            .iter()
                            .any(|&j| cover.contains(j + 1))
                });
                if !useful {
                    continue;
                }
                let anchor_cross = cover.first().unwrap() - 1;
                let (row, col) = if by_rows {
                    (i1, anchor_cross)
                } else {
                    (anchor_cross, i1)
                };
                let axis = if by_rows { "rows" } else { "columns" };
                instances.push(TechniqueInstance {
                    kind: TechniqueKind::Swordfish,
                    row,
                    col,
                    description: format!(
                        "{digit} forms a Swordfish on {axis} {}, {} and {}",
                        i1 + 1,
                        i2 + 1,
                        i3 + 1
                    ),
                });
            }
        }
    }
}

impl Detector for SwordfishDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::Swordfish
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let size = board.size();
        let mut instances = Vec::new();
        for digit in 1..=size {
            scan(candidates, true, digit, &mut instances);
            scan(candidates, false, digit, &mut instances);
        }
        instances
    }
}
