use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PracticeError;

// ---------------------------------------------------------------------------
// Category identifiers
// ---------------------------------------------------------------------------

/// Difficulty tier of an abacus drill.
///
/// Ordered easiest → hardest by convention; the numeric rules for each tier
/// live in the policy table, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    A,
    B,
    C,
    D,
    E,
}

impl CategoryId {
    pub const ALL: [CategoryId; 5] = [
        CategoryId::A,
        CategoryId::B,
        CategoryId::C,
        CategoryId::D,
        CategoryId::E,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::A => "A",
            CategoryId::B => "B",
            CategoryId::C => "C",
            CategoryId::D => "D",
            CategoryId::E => "E",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = PracticeError;

    /// Accepts `"A"`..`"E"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(CategoryId::A),
            "B" => Ok(CategoryId::B),
            "C" => Ok(CategoryId::C),
            "D" => Ok(CategoryId::D),
            "E" => Ok(CategoryId::E),
            _ => Err(PracticeError::UnknownCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator knobs
// ---------------------------------------------------------------------------

/// How a drill is kept from subtracting more than the learner has on the beads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtractionGuard {
    /// Compare each subtrahend only with the entry right before it and swap
    /// magnitudes when the subtrahend is larger. Cheap, but a running total
    /// can still dip below zero further along the drill.
    #[default]
    AdjacentPair,
    /// Reorder steps so the running total never goes negative; candidates
    /// with no such order are rejected and redrawn.
    RunningTotal,
}

impl fmt::Display for SubtractionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtractionGuard::AdjacentPair => write!(f, "adjacent-pair"),
            SubtractionGuard::RunningTotal => write!(f, "running-total"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeRequest {
    pub category: CategoryId,
    /// `Some(seed)` reproduces the exact same batch; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl PracticeRequest {
    /// Request an entropy-seeded batch for `category`.
    pub fn new(category: CategoryId) -> Self {
        PracticeRequest { category, rng_seed: None }
    }

    pub fn seeded(category: CategoryId, seed: u64) -> Self {
        PracticeRequest { category, rng_seed: Some(seed) }
    }
}

/// One abacus drill: start from `base_number`, apply every entry of `rows`
/// in order, and arrive at `correct_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// 1-based position within its batch.
    pub id: u32,
    pub base_number: u32,
    pub rows: Vec<i32>,
    pub correct_answer: u32,
    /// Generation attempts spent on this problem.
    pub attempts: u8,
    /// False only when every attempt missed the category's answer band and
    /// the last candidate was kept anyway.
    pub within_band: bool,
}

impl Problem {
    /// Base number followed by the rows, in presentation order.
    pub fn numbers(&self) -> Vec<i32> {
        let mut numbers = Vec::with_capacity(self.rows.len() + 1);
        numbers.push(self.base_number as i32);
        numbers.extend_from_slice(&self.rows);
        numbers
    }

    /// Running totals after each row, starting after the first row.
    pub fn running_totals(&self) -> Vec<i32> {
        let mut total = self.base_number as i32;
        self.rows
            .iter()
            .map(|&row| {
                total += row;
                total
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemBatch {
    pub category: CategoryId,
    pub problems: Vec<Problem>,
}

impl ProblemBatch {
    /// Problems that were accepted after exhausting their retry budget.
    pub fn out_of_band(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter().filter(|p| !p.within_band)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
