//! Unit bitmasks and per-cell candidate derivation.

use crate::{Board, DigitSet, Shape};

/// Row, column, and box availability masks for a board.
///
/// Each unit mask starts as the full digit set for the board side; placing a
/// digit clears its bit from the cell's row, column, and box masks. The
/// candidate mask of an empty cell is the intersection of its three unit
/// masks. The arrays are fixed-size so a solver can keep the whole structure
/// on the stack.
///
/// # Examples
///
/// ```
/// # use numforge_core::{Board, ConstraintMasks, Shape};
/// let mut board = Board::empty(Shape::CLASSIC);
/// board.set(0, 0, 5);
/// let masks = ConstraintMasks::from_board(&board);
/// assert!(!masks.candidates(0, 3).contains(5));
/// assert!(masks.candidates(3, 3).contains(5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintMasks {
    shape: Shape,
    rows: [DigitSet; 16],
    cols: [DigitSet; 16],
    boxes: [DigitSet; 16],
}

impl ConstraintMasks {
    /// Builds the masks for every placed digit on a board.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let shape = board.shape();
        let full = DigitSet::full(shape.size());
        let mut masks = Self {
            shape,
            rows: [full; 16],
            cols: [full; 16],
            boxes: [full; 16],
        };
        for (row, col, digit) in board.clues() {
            masks.place(row, col, digit);
        }
        masks
    }

    /// Returns the candidate mask for a cell position.
    ///
    /// This is meaningful for empty cells; for a filled cell it reports what
    /// the surrounding units would still admit.
    #[must_use]
    #[inline]
    pub fn candidates(&self, row: u8, col: u8) -> DigitSet {
        let b = self.shape.box_index(row, col);
        self.rows[row as usize] & self.cols[col as usize] & self.boxes[b as usize]
    }

    /// Records a digit placement by clearing its bit from the three units.
    #[inline]
    pub fn place(&mut self, row: u8, col: u8, digit: u8) {
        let b = self.shape.box_index(row, col);
        self.rows[row as usize].remove(digit);
        self.cols[col as usize].remove(digit);
        self.boxes[b as usize].remove(digit);
    }

    /// Reverts a placement by restoring the digit to the three units.
    #[inline]
    pub fn unplace(&mut self, row: u8, col: u8, digit: u8) {
        let b = self.shape.box_index(row, col);
        self.rows[row as usize].insert(digit);
        self.cols[col as usize].insert(digit);
        self.boxes[b as usize].insert(digit);
    }

    /// Returns the availability mask of a row.
    #[must_use]
    #[inline]
    pub fn row(&self, row: u8) -> DigitSet {
        self.rows[row as usize]
    }

    /// Returns the availability mask of a column.
    #[must_use]
    #[inline]
    pub fn col(&self, col: u8) -> DigitSet {
        self.cols[col as usize]
    }

    /// Returns the availability mask of a box.
    #[must_use]
    #[inline]
    pub fn box_mask(&self, box_index: u8) -> DigitSet {
        self.boxes[box_index as usize]
    }
}

/// Per-cell candidate masks for a whole board.
///
/// An empty cell holds the intersection of its three unit masks; a filled
/// cell holds the empty set. Technique detection computes this once per
/// entry and shares it across all detectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    shape: Shape,
    cells: Vec<DigitSet>,
}

impl CandidateGrid {
    /// Derives the candidate grid for a board.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let shape = board.shape();
        let masks = ConstraintMasks::from_board(board);
        let cells = board
            .positions()
            .map(|(row, col)| {
                if board.get(row, col) == 0 {
                    masks.candidates(row, col)
                } else {
                    DigitSet::EMPTY
                }
            })
            .collect();
        Self { shape, cells }
    }

    /// Returns the board geometry this grid was derived from.
    #[must_use]
    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the candidate mask at a cell.
    #[must_use]
    #[inline]
    pub fn at(&self, row: u8, col: u8) -> DigitSet {
        self.cells[row as usize * self.shape.size() as usize + col as usize]
    }

    /// Iterates over the empty cells holding exactly `n` candidates.
    pub fn cells_with_count(&self, n: usize) -> impl Iterator<Item = (u8, u8)> + '_ {
        let size = self.shape.size();
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.at(row, col).len() == n)
    }
}
