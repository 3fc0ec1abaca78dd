//! Difficulty classes and the tunable thresholds between them.

use std::{fmt, str::FromStr};

/// A puzzle difficulty class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// Solvable by propagation alone.
    Easy,
    /// Light branching.
    Medium,
    /// Sustained branching.
    Hard,
    /// Deep search.
    Expert,
    /// Pathological search effort.
    Evil,
}

impl Difficulty {
    /// All classes, easiest first.
    pub const ALL: [Self; 5] = [
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Expert,
        Self::Evil,
    ];

    /// Returns the display name of the class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::Evil => "Evil",
        }
    }

    /// Returns the next easier class, if any.
    #[must_use]
    pub const fn easier(self) -> Option<Self> {
        match self {
            Self::Easy => None,
            Self::Medium => Some(Self::Easy),
            Self::Hard => Some(Self::Medium),
            Self::Expert => Some(Self::Hard),
            Self::Evil => Some(Self::Expert),
        }
    }

    /// Returns the next harder class, if any.
    #[must_use]
    pub const fn harder(self) -> Option<Self> {
        match self {
            Self::Easy => Some(Self::Medium),
            Self::Medium => Some(Self::Hard),
            Self::Hard => Some(Self::Expert),
            Self::Expert => Some(Self::Evil),
            Self::Evil => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a difficulty name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty: {name}")]
pub struct UnknownDifficulty {
    /// The token that failed to parse.
    pub name: String,
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "expert" => Ok(Self::Expert),
            "evil" => Ok(Self::Evil),
            _ => Err(UnknownDifficulty {
                name: s.trim().to_owned(),
            }),
        }
    }
}

/// Parses a comma-separated difficulty list.
///
/// Tokens are trimmed and matched case-insensitively; unrecognized tokens
/// are dropped. When nothing usable remains, the list defaults to a single
/// Medium entry.
///
/// # Examples
///
/// ```
/// # use numforge_solver::{Difficulty, parse_difficulty_list};
/// assert_eq!(
///     parse_difficulty_list(" easy, EVIL ,bogus"),
///     vec![Difficulty::Easy, Difficulty::Evil]
/// );
/// assert_eq!(parse_difficulty_list(""), vec![Difficulty::Medium]);
/// ```
#[must_use]
pub fn parse_difficulty_list(input: &str) -> Vec<Difficulty> {
    let parsed: Vec<Difficulty> = input
        .split(',')
        .filter_map(|token| token.parse().ok())
        .collect();
    if parsed.is_empty() {
        vec![Difficulty::Medium]
    } else {
        parsed
    }
}

/// Thresholds for one difficulty class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassTargets {
    /// Inclusive range of solver iterations typical for the class; the
    /// upper bound is `None` for the open-ended top class.
    pub iterations: (u64, Option<u64>),
    /// Composite-score range, left-closed and right-open; the classes tile
    /// the non-negative reals.
    pub scores: (f64, f64),
    /// Iteration count a generator aims for inside the class.
    pub iteration_goal: u64,
}

/// Where a score lands relative to a target class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetComparison {
    /// Below the class's score range.
    TooEasy,
    /// Inside the class's score range.
    InRange,
    /// At or above the class's upper score bound.
    TooHard,
}

/// The class threshold tables.
///
/// This is the policy surface of the engine: a plain value with public
/// fields so tests and tuning harnesses can substitute their own tables.
/// The default tables are the production thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyTargets {
    /// Per-class thresholds, indexed in [`Difficulty::ALL`] order.
    pub classes: [ClassTargets; 5],
    /// Relative tolerance of [`is_close_to_goal`](Self::is_close_to_goal).
    pub relative_tolerance: f64,
    /// Absolute tolerance of [`is_close_to_goal`](Self::is_close_to_goal).
    pub absolute_tolerance: f64,
}

impl Default for DifficultyTargets {
    fn default() -> Self {
        Self {
            classes: [
                ClassTargets {
                    iterations: (1, Some(10)),
                    scores: (0.0, 8.0),
                    iteration_goal: 5,
                },
                ClassTargets {
                    iterations: (11, Some(25)),
                    scores: (8.0, 20.0),
                    iteration_goal: 15,
                },
                ClassTargets {
                    iterations: (26, Some(80)),
                    scores: (20.0, 60.0),
                    iteration_goal: 40,
                },
                ClassTargets {
                    iterations: (81, Some(350)),
                    scores: (60.0, 250.0),
                    iteration_goal: 150,
                },
                ClassTargets {
                    iterations: (351, None),
                    scores: (250.0, f64::INFINITY),
                    iteration_goal: 400,
                },
            ],
            relative_tolerance: 0.25,
            absolute_tolerance: 5.0,
        }
    }
}

impl DifficultyTargets {
    /// Creates the default tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the thresholds of a class.
    #[must_use]
    pub fn class(&self, difficulty: Difficulty) -> &ClassTargets {
        &self.classes[difficulty.index()]
    }

    /// Classifies a solve by its iteration count.
    #[must_use]
    pub fn classify_by_iterations(&self, iterations: u64) -> Difficulty {
        for difficulty in Difficulty::ALL {
            if let (_, Some(hi)) = self.class(difficulty).iterations
                && iterations <= hi
            {
                return difficulty;
            }
        }
        Difficulty::Evil
    }

    /// Classifies a puzzle by its composite score.
    #[must_use]
    pub fn classify_by_score(&self, score: f64) -> Difficulty {
        for difficulty in Difficulty::ALL {
            let (_, hi) = self.class(difficulty).scores;
            if score < hi {
                return difficulty;
            }
        }
        Difficulty::Evil
    }

    /// Returns `true` if an iteration count is near the class goal.
    ///
    /// "Near" means within the relative tolerance of the goal or within the
    /// absolute tolerance, whichever admits more.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn is_close_to_goal(&self, iterations: u64, target: Difficulty) -> bool {
        let goal = self.class(target).iteration_goal as f64;
        let delta = (iterations as f64 - goal).abs();
        delta <= (self.relative_tolerance * goal).max(self.absolute_tolerance)
    }

    /// Compares a composite score against a target class's score range.
    #[must_use]
    pub fn compare_score(&self, score: f64, target: Difficulty) -> TargetComparison {
        let (lo, hi) = self.class(target).scores;
        if score < lo {
            TargetComparison::TooEasy
        } else if score >= hi {
            TargetComparison::TooHard
        } else {
            TargetComparison::InRange
        }
    }

    /// Returns `true` if the score falls inside the target class's range.
    #[must_use]
    pub fn score_in_class(&self, score: f64, target: Difficulty) -> bool {
        self.compare_score(score, target) == TargetComparison::InRange
    }
}
