use numforge_core::{Board, CandidateGrid};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds XY-Wing patterns.
///
/// A bivalue pivot `{A, B}` with two bivalue wings `{A, C}` and `{B, C}`,
/// each sharing a unit with the pivot, eliminates `C` from any cell seeing
/// both wings. The pattern is reported when such a cell actually carries
/// `C` as a candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyWingDetector;

impl XyWingDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Collects every cell holding exactly `n` candidates.
pub(super) fn cells_with_count(candidates: &CandidateGrid, n: usize) -> ArrayVec<[(u8, u8); 256]> {
    candidates.cells_with_count(n).collect()
}

impl Detector for XyWingDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XYWing
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let shape = board.shape();
        let bivalue = cells_with_count(candidates, 2);
        let mut instances = Vec::new();
        for &pivot in &bivalue {
            let pivot_mask = candidates.at(pivot.0, pivot.1);
            let wings: ArrayVec<[(u8, u8); 256]> = bivalue
                .iter()
                .copied()
                .filter(|&w| w != pivot && shape.sees(w, pivot))
                .filter(|&w| candidates.at(w.0, w.1).intersection(pivot_mask).len() == 1)
                .collect();
            for (i, &w1) in wings.iter().enumerate() {
                let m1 = candidates.at(w1.0, w1.1);
                for &w2 in &wings[i + 1..] {
                    let m2 = candidates.at(w2.0, w2.1);
                    // The wings must split the pivot digits between them and
                    // agree on a third digit C.
                    if (m1 | m2 | pivot_mask).len() != 3 || m1 == m2 {
                        continue;
                    }
                    let shared = m1 & m2;
                    let Some(c) = shared.difference(pivot_mask).as_single() else {
                        continue;
                    };
                    let useful = board.positions().any(|cell| {
                        cell != pivot
                            && cell != w1
                            && cell != w2
                            && shape.sees(cell, w1)
                            && shape.sees(cell, w2)
                            && candidates.at(cell.0, cell.1).contains(c)
                    });
                    if !useful {
                        continue;
                    }
                    instances.push(TechniqueInstance {
                        kind: TechniqueKind::XYWing,
                        row: pivot.0,
                        col: pivot.1,
                        description: format!(
                            "XY-Wing with pivot r{}c{} removes {c} via wings r{}c{} and r{}c{}",
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

#[cfg(test)]
mod tests {
    use numforge_core::{DigitSet, Shape};

    use super::*;

    /// Builds a board with pivot {1,2} at r1c1, wing {1,3} at r1c5, and
    /// wing {2,3} at r5c1; r5c5 sees both wings and still allows 3.
    fn board_with_xy_wing() -> Board {
        let mut board = Board::empty(Shape::CLASSIC);
        for (row, col, digit) in [
            // Pivot exclusions: row 0, column 0, and box 0 strip 3..=9.
            (0, 3, 4),
            (0, 6, 5),
            (0, 7, 6),
            (0, 8, 7),
            (6, 0, 8),
            (7, 0, 9),
            (8, 0, 7),
            (1, 1, 3),
            // Wing r1c5: box 1 and column 5 strip 2, 8 and 9.
            (1, 5, 2),
            (2, 4, 8),
            (6, 4, 9),
            // Wing r5c1: row 4 and box 3 strip 1, 4, 5 and 6.
            (4, 6, 4),
            (4, 7, 5),
            (4, 8, 6),
            (3, 1, 1),
        ] {
            board.set(row, col, digit);
        }
        board
    }

    #[test]
    fn test_detects_xy_wing() {
        let board = board_with_xy_wing();
        let candidates = CandidateGrid::from_board(&board);
        assert_eq!(candidates.at(0, 0), DigitSet::from_iter([1, 2]));
        assert_eq!(candidates.at(0, 4), DigitSet::from_iter([1, 3]));
        assert_eq!(candidates.at(4, 0), DigitSet::from_iter([2, 3]));
        let instances = XyWingDetector::new().detect(&board, &candidates);
        let hit = instances
            .iter()
            .find(|i| (i.row, i.col) == (0, 0))
            .expect("xy-wing with pivot r1c1");
        assert!(hit.description.contains("removes 3"));
    }

    #[test]
    fn test_empty_board_has_none() {
        let board = Board::empty(Shape::CLASSIC);
        let candidates = CandidateGrid::from_board(&board);
        assert!(XyWingDetector::new().detect(&board, &candidates).is_empty());
    }
}
