use numforge_core::{Board, CandidateGrid, Unit};

use super::{BoxedDetector, Detector, TechniqueInstance, TechniqueKind};

/// Finds digits with exactly one remaining position in a unit.
///
/// Units are scanned rows first, then columns, then boxes, and a cell is
/// reported at most once: a hidden single found via a row suppresses later
/// findings at the same cell through the overlapping column or box,
/// whatever digit they involve. This keeps the instance list, and with it
/// the technique score, stable.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingleDetector;

impl HiddenSingleDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn unit_label(unit: Unit) -> String {
    match unit {
        Unit::Row(i) => format!("row {}", i + 1),
        Unit::Column(i) => format!("column {}", i + 1),
        Unit::Box(i) => format!("box {}", i + 1),
    }
}

impl Detector for HiddenSingleDetector {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenSingle
    }

    fn clone_box(&self) -> BoxedDetector {
        Box::new(*self)
    }

    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
        let shape = board.shape();
        let size = shape.size();
        let mut reported = [[false; 16]; 16];
        let mut instances = Vec::new();
        for unit in Unit::all(size) {
            for digit in 1..=size {
                let mut found = None;
                let mut count = 0;
                for (row, col) in unit.cells(shape) {
                    if candidates.at(row, col).contains(digit) {
                        found = Some((row, col));
                        count += 1;
                        if count > 1 {
                            break;
                        }
                    }
                }
                if count != 1 {
                    continue;
                }
                let (row, col) = found.unwrap();
                // A naked single is also a hidden single in all three of its
                // units; only plain hidden singles are reported here.
                if candidates.at(row, col).len() == 1 {
                    continue;
                }
                if reported[row as usize][col as usize] {
                    continue;
                }
                reported[row as usize][col as usize] = true;
                instances.push(TechniqueInstance {
                    kind: TechniqueKind::HiddenSingle,
                    row,
                    col,
                    description: format!(
                        "{digit} fits only at r{}c{} in {}",
                        row + 1,
                        col + 1,
                        unit_label(unit)
                    ),
                });
            }
        }
        instances
    }
}
