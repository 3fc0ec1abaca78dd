//! Board validation against the row/column/box invariant.

use crate::{Board, Unit};

/// A duplicated digit within one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitViolation {
    /// The unit containing the duplicate.
    pub unit: Unit,
    /// The duplicated digit.
    pub digit: u8,
}

/// Result of scanning a board for unit violations.
///
/// Validation itself never raises; callers inspect the report and decide
/// whether a dirty board is an error.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    violations: Vec<UnitViolation>,
}

impl ValidationReport {
    /// Returns `true` if no unit contains a duplicated digit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns every offending (unit, digit) pair.
    #[must_use]
    pub fn violations(&self) -> &[UnitViolation] {
        &self.violations
    }
}

/// Scans every row, column, and box for duplicated digits.
///
/// Empty cells are ignored. A digit appearing `n > 1` times in a unit is
/// reported once for that unit.
#[must_use]
pub fn validate_units(board: &Board) -> ValidationReport {
    let shape = board.shape();
    let mut report = ValidationReport::default();
    for unit in Unit::all(shape.size()) {
        let mut counts = [0u8; 17];
        for (row, col) in unit.cells(shape) {
            counts[board.get(row, col) as usize] += 1;
        }
        for digit in 1..=shape.size() {
            if counts[digit as usize] > 1 {
                report.violations.push(UnitViolation { unit, digit });
            }
        }
    }
    report
}
