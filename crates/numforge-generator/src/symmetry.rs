//! Clue-position symmetry detection.

use numforge_core::Board;

/// The four symmetries checked over clue positions, plus a weighted score.
///
/// A symmetry holds when the transform maps every clue position onto
/// another clue position and at least one clue lies off the transform's
/// fixed-point set, so that the symmetry is not vacuous (a lone clue on the
/// main diagonal does not make a board diagonally symmetric).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryInfo {
    /// 180° rotational symmetry.
    pub rotational: bool,
    /// Mirror symmetry across the horizontal midline.
    pub horizontal: bool,
    /// Mirror symmetry across the vertical midline.
    pub vertical: bool,
    /// Reflection across the main diagonal.
    pub diagonal: bool,
    /// Weighted sum of the four flags.
    pub score: f64,
}

fn holds(board: &Board, transform: impl Fn(u8, u8) -> (u8, u8)) -> bool {
    let mut nontrivial = false;
    for (row, col, _) in board.clues() {
        let (tr, tc) = transform(row, col);
        if board.get(tr, tc) == 0 {
            return false;
        }
        if (tr, tc) != (row, col) {
            nontrivial = true;
        }
    }
    nontrivial
}

impl SymmetryInfo {
    /// Weight of the rotational flag in the score.
    pub const ROTATIONAL_WEIGHT: f64 = 0.30;
    /// Weight of the horizontal flag in the score.
    pub const HORIZONTAL_WEIGHT: f64 = 0.25;
    /// Weight of the vertical flag in the score.
    pub const VERTICAL_WEIGHT: f64 = 0.25;
    /// Weight of the diagonal flag in the score.
    pub const DIAGONAL_WEIGHT: f64 = 0.20;

    /// Inspects the clue positions of a board.
    #[must_use]
    pub fn detect(board: &Board) -> Self {
        let last = board.size() - 1;
        let rotational = holds(board, |r, c| (last - r, last - c));
        let horizontal = holds(board, |r, c| (last - r, c));
        let vertical = holds(board, |r, c| (r, last - c));
        let diagonal = holds(board, |r, c| (c, r));
        let score = f64::from(u8::from(rotational)) * Self::ROTATIONAL_WEIGHT
            + f64::from(u8::from(horizontal)) * Self::HORIZONTAL_WEIGHT
            + f64::from(u8::from(vertical)) * Self::VERTICAL_WEIGHT
            + f64::from(u8::from(diagonal)) * Self::DIAGONAL_WEIGHT;
        Self {
            rotational,
            horizontal,
            vertical,
            diagonal,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use numforge_core::Shape;

    use super::*;

    #[test]
    fn test_corner_pair_is_rotational_only() {
        let mut board = Board::empty(Shape::CLASSIC);
        board.set(0, 0, 1);
        board.set(8, 8, 2);
        let info = SymmetryInfo::detect(&board);
        assert!(info.rotational);
        assert!(!info.horizontal);
        assert!(!info.vertical);
        assert!(!info.diagonal);
        assert!((info.score - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_empty_board_has_no_symmetry() {
        let board = Board::empty(Shape::CLASSIC);
        let info = SymmetryInfo::detect(&board);
        assert!(!info.rotational && !info.horizontal && !info.vertical && !info.diagonal);
        assert!((info.score).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_mirror() {
        let mut board = Board::empty(Shape::CLASSIC);
        board.set(1, 3, 4);
        board.set(7, 3, 5);
        let info = SymmetryInfo::detect(&board);
        assert!(info.horizontal);
        assert!(!info.vertical);
        assert!((info.score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_reflection() {
        let mut board = Board::empty(Shape::CLASSIC);
        board.set(2, 5, 1);
        board.set(5, 2, 9);
        let info = SymmetryInfo::detect(&board);
        assert!(info.diagonal);
        assert!(!info.rotational);
    }

    #[test]
    fn test_fully_symmetric_scores_one() {
        // A centered plus sign is symmetric under all four transforms.
        let mut board = Board::empty(Shape::CLASSIC);
        board.set(4, 4, 5);
        board.set(0, 4, 1);
        board.set(8, 4, 2);
        board.set(4, 0, 3);
        board.set(4, 8, 4);
        let info = SymmetryInfo::detect(&board);
        assert!(info.rotational && info.horizontal && info.vertical && info.diagonal);
        assert!((info.score - 1.0).abs() < 1e-9);
    }
}
