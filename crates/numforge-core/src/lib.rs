//! Core grid types for the numforge puzzle engine.
//!
//! This crate holds the data model shared by the solver and generator:
//!
//! - [`Board`] and [`Shape`]: a dense square grid with fixed box geometry,
//!   supporting sides 4 through 16
//! - [`DigitSet`]: a candidate bitset sized for one unit
//! - [`Unit`]: row/column/box enumeration
//! - [`ConstraintMasks`] and [`CandidateGrid`]: the availability masks the
//!   solver works with and the per-cell candidate view techniques read
//! - [`validate_units`]: the row/column/box duplicate scan
//!
//! Everything here is a plain value: no interior mutability, no I/O, no
//! global state. Boards are cloned freely and never shared across threads.

pub use self::{
    board::{Board, ParseOffense, ParseReport, Shape, ShapeError},
    digit_set::{DigitSet, DigitSetIter, MAX_DIGIT},
    masks::{CandidateGrid, ConstraintMasks},
    unit::Unit,
    validator::{UnitViolation, ValidationReport, validate_units},
};

mod board;
mod digit_set;
mod masks;
mod unit;
mod validator;
