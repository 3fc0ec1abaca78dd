use numforge_core::{Board, CandidateGrid};
use tinyvec::ArrayVec;

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds X-Wing patterns: a digit confined to the same two columns in two
/// rows (or, mirrored, the same two rows in two columns).
///
/// The pattern is reported when some other line still carries the digit in
/// one of the two covering lines, so the wing eliminates at least one
/// candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct XWingDetector;

impl XWingDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Positions of `digit` along line `i`, where a line is a row when `by_rows`
/// and a column otherwise.
pub(super) fn line_positions(
    candidates: &CandidateGrid,
    by_rows: bool,
    i: u8,
    digit: u8,
) -> ArrayVec<[u8; 16]> {
    let size = candidates.shape().size();
    let mut positions = ArrayVec::new();
    for j in 0..size {
        let (row, col) = if by_rows { (i, j) } else { (j, i) };
        if candidates.at(row, col).contains(digit) {
            positions.push(j);
        }
    }
    positions
}

fn scan(
    candidates: &CandidateGrid,
    by_rows: bool,
    digit: u8,
    instances: &mut Vec<TechniqueInstance>,
) {
    let size = candidates.shape().size();
    let mut doubles: ArrayVec<[(u8, (u8, u8)); 16]> = ArrayVec::new();
    for i in 0..size {
        let positions = line_positions(candidates, by_rows, i, digit);
        if let &[a, b] = positions.as_slice() {
            doubles.push((i, (a, b)));
        }
    }
    for (n, &(i1, cover)) in doubles.iter().enumerate() {
        for &(i2, cover2) in &doubles[n + 1..] {
            if cover != cover2 {
                continue;
            }
            let useful = (0..size).any(|other| {
                other != i1
                    && other != i2
                    && line_positions(candidates, by_rows, other, digit)
                        .iter()
                        .any(|&j| j == cover.0 || j == cover.1)
            });
            if !useful {
                continue;
            }
            let (row, col) = if by_rows { (i1, cover.0) } else { (cover.0, i1) };
            let axis = if by_rows { "rows" } else { "columns" };
            instances.push(TechniqueInstance {
                kind: TechniqueKind::XWing,
                row,
                col,
                description: format!(
                    "{digit} forms an X-Wing on {axis} {} and {}",
                    i1 + 1,
                    i2 + 1
                ),
            });
        }
    }
}

impl Detector for XWingDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XWing
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
