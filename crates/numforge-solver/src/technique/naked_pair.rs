use numforge_core::{Board, CandidateGrid, DigitSet, Unit};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds two cells of one unit sharing the same two-candidate mask.
///
/// The pair is only reported when some other cell of the unit still holds
/// one of the two digits as a candidate, so that the pair actually
/// eliminates something.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedPairDetector;

impl NakedPairDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Detector for NakedPairDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::NakedPair
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let shape = board.shape();
        let mut instances = Vec::new();
        for unit in Unit::all(shape.size()) {
            let mut bivalue: ArrayVec<[(u8, u8); 16]> = ArrayVec::new();
            for (row, col) in unit.cells(shape) {
                if candidates.at(row, col).len() == 2 {
                    bivalue.push((row, col));
                }
            }
            for (i, &(r1, c1)) in bivalue.iter().enumerate() {
                let mask = candidates.at(r1, c1);
                for &(r2, c2) in &bivalue[i + 1..] {
                    if candidates.at(r2, c2) != mask {
                        continue;
                    }
                    let useful = unit.cells(shape).any(|(row, col)| {
                        (row, col) != (r1, c1)
                            && (row, col) != (r2, c2)
                            && !candidates.at(row, col).is_disjoint(mask)
                    });
                    if !useful {
                        continue;
                    }
                    instances.push(instance(mask, (r1, c1), (r2, c2)));
                }
            }
        }
        instances
    }
}

fn instance(mask: DigitSet, first: (u8, u8), second: (u8, u8)) -> TechniqueInstance {
    let mut digits = mask.iter();
    let (a, b) = (digits.next().unwrap(), digits.next().unwrap());
    TechniqueInstance {
        kind: TechniqueKind::NakedPair,
        row: first.0,
        col: first.1,
        description: format!(
            "{a} and {b} are locked into r{}c{} and r{}c{}",
            first.0 + 1,
            first.1 + 1,
            second.0 + 1,
            second.1 + 1
        ),
    }
}

#[cfg(test)]
mod tests {
    use numforge_core::Shape;

    use super::*;

    /// Builds a 9x9 board where (0,0) and (0,1) both hold exactly {8, 9}:
    /// columns 1 and 2 each carry the digits 1..=7 below the top band.
    fn board_with_pair() -> Board {
        let mut board = Board::empty(Shape::CLASSIC);
        let col0 = [1, 2, 3, 4, 5, 6, 7];
        let col1 = [4, 5, 6, 7, 1, 2, 3];
        for (i, (&a, &b)) in col0.iter().zip(col1.iter()).enumerate() {
            let row = u8::try_from(i).unwrap() + 2;
            board.set(row, 0, a);
            board.set(row, 1, b);
        }
        // Keep the cells below the pair from forming a second one.
        board.set(1, 5, 8);
        board
    }

    #[test]
    fn test_detects_useful_pair() {
        let board = board_with_pair();
        let candidates = CandidateGrid::from_board(&board);
        assert_eq!(candidates.at(0, 0), DigitSet::from_iter([8, 9]));
        assert_eq!(candidates.at(0, 1), DigitSet::from_iter([8, 9]));
        let instances = NakedPairDetector::new().detect(&board, &candidates);
        let hit = instances
            .iter()
            .find(|i| (i.row, i.col) == (0, 0))
            .expect("pair at r1c1");
        assert_eq!(hit.kind, TechniqueKind::NakedPair);
    }

    #[test]
    fn test_empty_board_has_none() {
        let board = Board::empty(Shape::CLASSIC);
        let candidates = CandidateGrid::from_board(&board);
        assert!(
            NakedPairDetector::new()
                .detect(&board, &candidates)
                .is_empty()
        );
    }
}
