//! Per-category numeric rules and generator configuration.
//!
//! Every magic number the generator needs (digit ranges, step count, answer
//! band, retry cap, batch size) lives here as data. The built-in table is the
//! canonical A–E ladder; a TOML file can override individual rows:
//!
//! ```toml
//! batch_size = 100
//! max_attempts = 10
//! subtraction_guard = "adjacent_pair"
//!
//! [[category]]
//! id = "C"
//! base = { min = 3, max = 6 }
//! step = { min = 3, max = 6 }
//! step_count = 4
//! answer = "absolute"
//! band = { min = 10, max = 30 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::PracticeError;
use crate::practice_engine::models::{CategoryId, SubtractionGuard};

/// Env var naming a TOML file with generator overrides.
pub const POLICY_PATH_ENV: &str = "ABACUS_POLICY_PATH";

pub const DEFAULT_BATCH_SIZE: u32 = 100;
pub const DEFAULT_MAX_ATTEMPTS: u8 = 10;

// ---------------------------------------------------------------------------
// Policy primitives
// ---------------------------------------------------------------------------

/// Inclusive range of magnitudes to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitRange {
    pub min: u32,
    pub max: u32,
}

impl DigitRange {
    pub const fn new(min: u32, max: u32) -> Self {
        DigitRange { min, max }
    }

    /// Draw a magnitude. Validated policies keep `max` within `i32`; anything
    /// larger saturates rather than wrapping negative.
    pub fn draw<R: Rng>(self, rng: &mut R) -> i32 {
        i32::try_from(rng.gen_range(self.min..=self.max)).unwrap_or(i32::MAX)
    }

    pub fn contains(self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// How the signed sum of a drill becomes the answer the learner types in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerTransform {
    /// `|sum| % 10` — only the ones rod is read off the abacus.
    OnesDigit,
    /// `|sum|`
    Absolute,
}

impl AnswerTransform {
    pub fn apply(self, sum: i32) -> u32 {
        match self {
            AnswerTransform::OnesDigit => sum.unsigned_abs() % 10,
            AnswerTransform::Absolute  => sum.unsigned_abs(),
        }
    }
}

/// Inclusive band the answer must land in for a candidate to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBand {
    pub min: u32,
    pub max: u32,
}

impl AnswerBand {
    pub const fn new(min: u32, max: u32) -> Self {
        AnswerBand { min, max }
    }

    pub fn accepts(self, answer: u32) -> bool {
        (self.min..=self.max).contains(&answer)
    }
}

/// Numeric rules for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    pub id: CategoryId,
    pub base: DigitRange,
    pub step: DigitRange,
    pub step_count: usize,
    pub answer: AnswerTransform,
    pub band: AnswerBand,
}

impl CategoryPolicy {
    /// Largest absolute value any running total can reach: every entry at
    /// its maximum magnitude with the same sign.
    pub fn max_magnitude(&self) -> u64 {
        u64::from(self.base.max)
            .saturating_add((self.step_count as u64).saturating_mul(u64::from(self.step.max)))
    }

    pub fn validate(&self) -> Result<(), PracticeError> {
        let invalid = |reason: &str| PracticeError::InvalidPolicy {
            category: self.id,
            reason: reason.to_string(),
        };
        if self.base.min == 0 {
            return Err(invalid("base range must start at 1 or above"));
        }
        if self.base.min > self.base.max {
            return Err(invalid("base range min exceeds max"));
        }
        if self.step.min == 0 {
            return Err(invalid("step range must start at 1 or above"));
        }
        if self.step.min > self.step.max {
            return Err(invalid("step range min exceeds max"));
        }
        if self.step_count == 0 {
            return Err(invalid("step_count must be at least 1"));
        }
        if self.band.min > self.band.max {
            return Err(invalid("answer band min exceeds max"));
        }
        if self.max_magnitude() > i32::MAX as u64 {
            return Err(invalid("base and step ranges can overflow a drill total"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

const SMALL: DigitRange = DigitRange::new(1, 4);
const MEDIUM: DigitRange = DigitRange::new(3, 6);
const SINGLE: DigitRange = DigitRange::new(1, 9);

const DEFAULT_POLICIES: [CategoryPolicy; 5] = [
    CategoryPolicy {
        id: CategoryId::A, base: SMALL, step: SMALL, step_count: 4,
        answer: AnswerTransform::OnesDigit, band: AnswerBand::new(1, 9),
    },
    CategoryPolicy {
        id: CategoryId::B, base: SMALL, step: SMALL, step_count: 4,
        answer: AnswerTransform::OnesDigit, band: AnswerBand::new(1, 9),
    },
    CategoryPolicy {
        id: CategoryId::C, base: MEDIUM, step: MEDIUM, step_count: 4,
        answer: AnswerTransform::Absolute, band: AnswerBand::new(10, 30),
    },
    CategoryPolicy {
        id: CategoryId::D, base: MEDIUM, step: MEDIUM, step_count: 4,
        answer: AnswerTransform::Absolute, band: AnswerBand::new(20, 50),
    },
    CategoryPolicy {
        id: CategoryId::E, base: DigitRange::new(10, 35), step: SINGLE, step_count: 4,
        answer: AnswerTransform::Absolute, band: AnswerBand::new(10, 99),
    },
];

/// Lookup table from category to its numeric rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: BTreeMap<CategoryId, CategoryPolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        PolicyTable {
            policies: DEFAULT_POLICIES.iter().map(|p| (p.id, *p)).collect(),
        }
    }
}

impl PolicyTable {
    /// Every category id has a row; a table is always built from the defaults
    /// plus overrides, so lookups cannot miss.
    pub fn policy(&self, id: CategoryId) -> &CategoryPolicy {
        &self.policies[&id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryPolicy> {
        self.policies.values()
    }

    /// Replace the rows named in `overrides`, keeping defaults for the rest.
    pub fn with_overrides(mut self, overrides: &[CategoryPolicy]) -> Result<Self, PracticeError> {
        for policy in overrides {
            policy.validate()?;
            self.policies.insert(policy.id, *policy);
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Generator configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u8,
    #[serde(default)]
    pub subtraction_guard: SubtractionGuard,
    /// Category rows that replace the built-in ones.
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryPolicy>,
}

fn default_batch_size() -> u32 { DEFAULT_BATCH_SIZE }
fn default_max_attempts() -> u8 { DEFAULT_MAX_ATTEMPTS }

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            subtraction_guard: SubtractionGuard::default(),
            categories: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, PracticeError> {
        let config: GeneratorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PracticeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PracticeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load from the file named by [`POLICY_PATH_ENV`]. Falls back to the
    /// defaults when the variable is unset or the file is unusable.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var(POLICY_PATH_ENV) else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(config) => {
                info!(target: "abacus_drill_gen", %path, overrides = config.categories.len(), "Loaded policy config");
                config
            }
            Err(e) => {
                error!(target: "abacus_drill_gen", %path, error = %e, "Failed to load policy config; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), PracticeError> {
        if self.batch_size == 0 {
            return Err(PracticeError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(PracticeError::InvalidConfig("max_attempts must be at least 1".into()));
        }
        self.categories.iter().try_for_each(CategoryPolicy::validate)
    }

    /// Built-in table with this config's overrides applied.
    pub fn policy_table(&self) -> Result<PolicyTable, PracticeError> {
        PolicyTable::default().with_overrides(&self.categories)
    }
}
