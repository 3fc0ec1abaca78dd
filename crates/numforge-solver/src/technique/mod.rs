//! Detection of named human solving techniques.
//!
//! Each detector implements the [`Detector`] trait, scanning an immutable
//! board plus its derived [`CandidateGrid`] and reporting every useful
//! occurrence of its technique. Detection is pure: nothing mutates the
//! board, so the rater can probe speculatively without cloning.
//!
//! A technique is only reported when applying it would eliminate at least
//! one candidate somewhere; patterns that exist but change nothing are
//! skipped.

use std::fmt::Debug;

use numforge_core::{Board, CandidateGrid};

pub use self::{
    hidden_pair::HiddenPairDetector, hidden_single::HiddenSingleDetector,
    naked_pair::NakedPairDetector, naked_single::NakedSingleDetector,
    swordfish::SwordfishDetector, x_wing::XWingDetector, xy_wing::XyWingDetector,
    xyz_wing::XyzWingDetector,
};

mod hidden_pair;
mod hidden_single;
mod naked_pair;
mod naked_single;
mod swordfish;
mod x_wing;
mod xy_wing;
mod xyz_wing;

/// The named techniques the detector suite recognizes.
///
/// The discriminant of each variant is its difficulty weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TechniqueKind {
    /// A cell with exactly one candidate.
    NakedSingle = 1,
    /// A digit with exactly one position in a unit.
    HiddenSingle = 2,
    /// Two cells of a unit sharing the same two-candidate mask.
    NakedPair = 4,
    /// Two digits confined to the same two cells of a unit.
    HiddenPair = 5,
    /// A digit confined to the same two columns in two rows (or mirrored).
    XWing = 8,
    /// A bivalue pivot with two bivalue wings eliminating their shared digit.
    XYWing = 10,
    /// A digit confined to three columns across three rows (or mirrored).
    Swordfish = 12,
    /// A trivalue pivot with two bivalue wings eliminating their shared digit.
    XYZWing = 14,
}

impl TechniqueKind {
    /// All techniques, in weight order.
    pub const ALL: [Self; 8] = [
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::NakedPair,
        Self::HiddenPair,
        Self::XWing,
        Self::XYWing,
        Self::Swordfish,
        Self::XYZWing,
    ];

    /// Returns the difficulty weight of the technique.
    #[must_use]
    pub const fn weight(self) -> u32 {
        self as u32
    }

    /// Returns the display name of the technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NakedSingle => "Naked Single",
            Self::HiddenSingle => "Hidden Single",
            Self::NakedPair => "Naked Pair",
            Self::HiddenPair => "Hidden Pair",
            Self::XWing => "X-Wing",
            Self::XYWing => "XY-Wing",
            Self::Swordfish => "Swordfish",
            Self::XYZWing => "XYZ-Wing",
        }
    }
}

/// One detected occurrence of a technique.
///
/// The anchor cell is the position a hint system would highlight first:
/// the single cell, the first cell of a pair or fish, or the wing pivot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueInstance {
    /// The technique that was found.
    pub kind: TechniqueKind,
    /// Anchor row of the occurrence.
    pub row: u8,
    /// Anchor column of the occurrence.
    pub col: u8,
    /// Human-readable description of the occurrence.
    pub description: String,
}

/// A technique detector.
pub trait Detector: Debug {
    /// Returns the technique this detector finds.
    fn kind(&self) -> TechniqueKind;

    /// Returns a boxed clone of the detector.
    fn clone_box(&self) -> BoxedDetector;

    /// Reports every useful occurrence of the technique on the board.
    fn detect(&self, board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance>;
}

/// A boxed detector.
pub type BoxedDetector = Box<dyn Detector>;

impl Clone for BoxedDetector {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns all detectors, ordered from lightest to heaviest technique.
#[must_use]
pub fn all_detectors() -> Vec<BoxedDetector> {
    vec![
        Box::new(NakedSingleDetector::new()),
        Box::new(HiddenSingleDetector::new()),
        Box::new(NakedPairDetector::new()),
        Box::new(HiddenPairDetector::new()),
        Box::new(XWingDetector::new()),
        Box::new(XyWingDetector::new()),
        Box::new(SwordfishDetector::new()),
        Box::new(XyzWingDetector::new()),
    ]
}

/// Runs every detector and concatenates the findings.
///
/// The candidate grid must have been derived from the same board.
#[must_use]
pub fn detect_all(board: &Board, candidates: &CandidateGrid) -> Vec<TechniqueInstance> {
    let mut instances = Vec::new();
    for detector in all_detectors() {
        instances.extend(detector.detect(board, candidates));
    }
    instances
}

/// Returns `true` if any cell is a naked single.
///
/// Cheap probe that avoids building instance descriptions.
#[must_use]
pub fn has_naked_single(candidates: &CandidateGrid) -> bool {
    candidates.cells_with_count(1).next().is_some()
}

/// Returns `true` if any unit holds a hidden single.
#[must_use]
pub fn has_hidden_single(board: &Board, candidates: &CandidateGrid) -> bool {
    !HiddenSingleDetector::new().detect(board, candidates).is_empty()
}

/// Aggregates a detection list into a technique score.
///
/// The score is the maximum technique weight present plus half a point per
/// additional distinct technique; an empty list scores 0.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn technique_score(instances: &[TechniqueInstance]) -> f64 {
    let mut max_weight = 0u32;
    let mut seen = [false; 8];
    let mut distinct = 0usize;
    for instance in instances {
        max_weight = max_weight.max(instance.kind.weight());
        let slot = TechniqueKind::ALL
            .iter()
            .position(|&k| k == instance.kind)
            .unwrap_or(0);
        if !seen[slot] {
            seen[slot] = true;
            distinct += 1;
        }
    }
    if distinct == 0 {
        return 0.0;
    }
    f64::from(max_weight) + 0.5 * (distinct - 1) as f64
}
