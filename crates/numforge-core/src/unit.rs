//! Row, column, and box units.

use crate::Shape;

/// One constraint unit of the grid: a row, a column, or a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// A row identified by its index (0-based).
    Row(u8),
    /// A column identified by its index (0-based).
    Column(u8),
    /// A box identified by its index (left to right, top to bottom).
    Box(u8),
}

impl Unit {
    /// Enumerates every unit of a board: all rows, then all columns, then
    /// all boxes.
    pub fn all(size: u8) -> impl Iterator<Item = Self> {
        (0..size)
            .map(Unit::Row)
            .chain((0..size).map(Unit::Column))
            .chain((0..size).map(Unit::Box))
    }

    /// Returns the cells of this unit in scan order.
    ///
    /// Rows and columns run by increasing index; box cells come in
    /// row-major order.
    pub fn cells(self, shape: Shape) -> impl Iterator<Item = (u8, u8)> {
        let size = shape.size();
        (0..size).map(move |i| match self {
            Unit::Row(r) => (r, i),
            Unit::Column(c) => (i, c),
            Unit::Box(b) => {
                let (r0, c0) = shape.box_origin(b);
                (r0 + i / shape.box_cols(), c0 + i % shape.box_cols())
            }
        })
    }

    /// Returns `true` if the cell belongs to this unit.
    #[must_use]
    pub const fn contains(self, shape: Shape, row: u8, col: u8) -> bool {
        match self {
            Unit::Row(r) => row == r,
            Unit::Column(c) => col == c,
            Unit::Box(b) => shape.box_index(row, col) == b,
        }
    }
}
