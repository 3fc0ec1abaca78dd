//! Grid state and box geometry.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Geometry of a board: side length and box shape.
///
/// A board of side `size` is partitioned into `size` boxes of
/// `box_rows × box_cols` cells, so the geometry is only valid when
/// `box_rows * box_cols == size`. The side may be at most 16 so that a
/// [`DigitSet`](crate::DigitSet) can hold a full unit.
///
/// # Examples
///
/// ```
/// # use numforge_core::Shape;
/// let shape = Shape::new(6, 2, 3)?;
/// assert_eq!(shape.box_index(3, 4), 3);
/// # Ok::<(), numforge_core::ShapeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    box_rows: u8,
    box_cols: u8,
}

/// Error produced when a board is constructed with mismatched geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid shape: {box_rows}x{box_cols} boxes do not tile a side-{size} grid")]
pub struct ShapeError {
    /// Requested board side.
    pub size: u8,
    /// Requested box height.
    pub box_rows: u8,
    /// Requested box width.
    pub box_cols: u8,
}

impl Shape {
    /// The classic 9×9 grid with 3×3 boxes.
    pub const CLASSIC: Self = Self {
        size: 9,
        box_rows: 3,
        box_cols: 3,
    };

    /// Creates a shape, validating the box geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] when `box_rows * box_cols != size`, when any
    /// dimension is zero, or when `size` exceeds 16.
    pub fn new(size: u8, box_rows: u8, box_cols: u8) -> Result<Self, ShapeError> {
        let err = ShapeError {
            size,
            box_rows,
            box_cols,
        };
        if size == 0 || size > 16 || box_rows == 0 || box_cols == 0 {
            return Err(err);
        }
        if u16::from(box_rows) * u16::from(box_cols) != u16::from(size) {
            return Err(err);
        }
        Ok(Self {
            size,
            box_rows,
            box_cols,
        })
    }

    /// Returns the board side.
    #[must_use]
    #[inline]
    pub const fn size(self) -> u8 {
        self.size
    }

    /// Returns the box height.
    #[must_use]
    #[inline]
    pub const fn box_rows(self) -> u8 {
        self.box_rows
    }

    /// Returns the box width.
    #[must_use]
    #[inline]
    pub const fn box_cols(self) -> u8 {
        self.box_cols
    }

    /// Returns the number of cells on the board.
    #[must_use]
    #[inline]
    pub const fn cell_count(self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Returns the box index of a cell.
    ///
    /// Boxes are numbered left to right, top to bottom.
    #[must_use]
    #[inline]
    pub const fn box_index(self, row: u8, col: u8) -> u8 {
        (row / self.box_rows) * (self.size / self.box_cols) + col / self.box_cols
    }

    /// Returns the top-left cell of a box.
    #[must_use]
    #[inline]
    pub const fn box_origin(self, box_index: u8) -> (u8, u8) {
        let boxes_per_row = self.size / self.box_cols;
        (
            (box_index / boxes_per_row) * self.box_rows,
            (box_index % boxes_per_row) * self.box_cols,
        )
    }

    /// Returns `true` if the two cells share a row, column, or box.
    #[must_use]
    #[inline]
    pub const fn sees(self, a: (u8, u8), b: (u8, u8)) -> bool {
        a.0 == b.0 || a.1 == b.1 || self.box_index(a.0, a.1) == self.box_index(b.0, b.1)
    }
}

/// A single out-of-range character found while parsing a board string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOffense {
    /// Cell index (row-major) where the character was found.
    pub index: usize,
    /// The offending character.
    pub ch: char,
}

/// Report of all offenses found while parsing a board string.
///
/// Parsing never fails: offending characters are substituted with empty
/// cells and recorded here. Callers decide whether a dirty report is an
/// error.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    offenses: Vec<ParseOffense>,
}

impl ParseReport {
    /// Returns `true` if no offending characters were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.offenses.is_empty()
    }

    /// Returns the recorded offenses in input order.
    #[must_use]
    pub fn offenses(&self) -> &[ParseOffense] {
        &self.offenses
    }
}

/// A square Sudoku grid with fixed box geometry.
///
/// Cells hold digits in `0..=size`, with 0 meaning empty. The grid is dense
/// and mutated by index only; bounds violations are programmer errors and
/// panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    shape: Shape,
    cells: Vec<u8>,
}

impl Board {
    /// Creates an empty board with the given geometry.
    #[must_use]
    pub fn empty(shape: Shape) -> Self {
        Self {
            cells: vec![0; shape.cell_count()],
            shape,
        }
    }

    /// Parses a board from a row-major text form.
    ///
    /// Characters `'1'..='9'` are digit values, `'.'`, `'0'`, and `'_'` are
    /// empty cells, and whitespace is skipped. Input beyond `size²` cells is
    /// ignored; short input leaves the remaining cells empty. Any other
    /// character (including a digit above the board side) is substituted
    /// with an empty cell and recorded in the returned [`ParseReport`].
    ///
    /// The text form is only defined for boards of side 9 or less.
    ///
    /// # Panics
    ///
    /// Panics if the shape's side exceeds 9.
    #[must_use]
    pub fn from_text(shape: Shape, text: &str) -> (Self, ParseReport) {
        assert!(shape.size() <= 9, "text form is only defined for side <= 9");
        let mut board = Self::empty(shape);
        let mut report = ParseReport::default();
        let mut index = 0;
        for ch in text.chars() {
            if index >= shape.cell_count() {
                break;
            }
            if ch.is_whitespace() {
                continue;
            }
            match ch {
                '.' | '0' | '_' => {}
                '1'..='9' => {
                    let value = ch as u8 - b'0';
                    if value <= shape.size() {
                        board.cells[index] = value;
                    } else {
                        report.offenses.push(ParseOffense { index, ch });
                    }
                }
                _ => report.offenses.push(ParseOffense { index, ch }),
            }
            index += 1;
        }
        (board, report)
    }

    /// Returns the board geometry.
    #[must_use]
    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the board side.
    #[must_use]
    #[inline]
    pub const fn size(&self) -> u8 {
        self.shape.size()
    }

    #[inline]
    fn index(&self, row: u8, col: u8) -> usize {
        assert!(row < self.size() && col < self.size());
        row as usize * self.size() as usize + col as usize
    }

    /// Returns the digit at a cell, 0 meaning empty.
    #[must_use]
    #[inline]
    pub fn get(&self, row: u8, col: u8) -> u8 {
        self.cells[self.index(row, col)]
    }

    /// Sets the digit at a cell; 0 clears it.
    ///
    /// # Panics
    ///
    /// Panics if the value exceeds the board side.
    #[inline]
    pub fn set(&mut self, row: u8, col: u8, value: u8) {
        assert!(value <= self.size());
        let index = self.index(row, col);
        self.cells[index] = value;
    }

    /// Returns `true` if no cell is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.shape.cell_count() - self.clue_count()
    }

    /// Iterates over the filled cells as `(row, col, digit)`.
    pub fn clues(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.positions().filter_map(|(row, col)| {
            let v = self.get(row, col);
            (v != 0).then_some((row, col, v))
        })
    }

    /// Iterates over the empty cells as `(row, col)`.
    pub fn empty_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.positions()
            .filter(move |&(row, col)| self.get(row, col) == 0)
    }

    /// Iterates over all cell positions in row-major order.
    ///
    /// The iterator does not borrow the board, so cells may be mutated while
    /// it is live.
    pub fn positions(&self) -> impl Iterator<Item = (u8, u8)> + use<> {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    /// Iterates over the cells of a box in row-major order.
    pub fn box_cells(&self, box_index: u8) -> impl Iterator<Item = (u8, u8)> + use<> {
        let shape = self.shape;
        let (r0, c0) = shape.box_origin(box_index);
        (0..shape.size()).map(move |i| {
            (
                r0 + i / shape.box_cols(),
                c0 + i % shape.box_cols(),
            )
        })
    }

    /// Serializes the board to the row-major text form.
    ///
    /// Digits render as themselves and empty cells as `'.'`. Only defined
    /// for boards of side 9 or less.
    ///
    /// # Panics
    ///
    /// Panics if the board side exceeds 9.
    #[must_use]
    pub fn to_text(&self) -> String {
        assert!(self.size() <= 9, "text form is only defined for side <= 9");
        self.cells
            .iter()
            .map(|&v| if v == 0 { '.' } else { (b'0' + v) as char })
            .collect()
    }
}

impl Display for Board {
    /// Plain formatting emits the one-line text form; alternate (`{:#}`)
    /// formatting draws the grid with box separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return f.write_str(&self.to_text());
        }
        let size = self.size();
        for row in 0..size {
            if row > 0 && row % self.shape.box_rows() == 0 {
                writeln!(f)?;
            }
            for col in 0..size {
                if col > 0 && col % self.shape.box_cols() == 0 {
                    write!(f, " ")?;
                }
                let v = self.get(row, col);
                if v == 0 {
                    write!(f, "_")?;
                } else {
                    write!(f, "{v}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ShapeError;

    /// Parses a classic 9×9 board, ignoring parse offenses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (board, _) = Self::from_text(Shape::CLASSIC, s);
        Ok(board)
    }
}
