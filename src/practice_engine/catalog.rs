//! Display metadata for the category picker.
//!
//! Levels sit on a 1–12 scale shared with the rest of the course; only the
//! first five are populated by abacus drills.

use serde::Serialize;

use crate::practice_engine::models::CategoryId;

/// Top of the course-wide difficulty scale.
pub const MAX_LEVEL: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub level: u8,
    pub description: &'static str,
}

impl Category {
    pub fn difficulty_percentage(&self) -> f32 {
        difficulty_percentage(self.level)
    }

    pub fn difficulty_label(&self) -> DifficultyLabel {
        DifficultyLabel::from_percentage(self.difficulty_percentage())
    }
}

const CATEGORIES: [Category; 5] = [
    Category {
        id: CategoryId::A,
        name: "Small Friends",
        level: 1,
        description: "Add and take away 1 to 4 on a single rod; read off the ones digit.",
    },
    Category {
        id: CategoryId::B,
        name: "Small Friends Review",
        level: 2,
        description: "More single-rod practice with 1 to 4; answers are always 1 to 9.",
    },
    Category {
        id: CategoryId::C,
        name: "Medium Moves",
        level: 3,
        description: "Steps of 3 to 6 with answers between 10 and 30.",
    },
    Category {
        id: CategoryId::D,
        name: "Medium Moves Plus",
        level: 4,
        description: "Steps of 3 to 6 aiming for answers between 20 and 50.",
    },
    Category {
        id: CategoryId::E,
        name: "Two-Digit Start",
        level: 5,
        description: "Start from 10 to 35 and apply four single-digit steps.",
    },
];

pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

pub fn category(id: CategoryId) -> &'static Category {
    // CATEGORIES is in CategoryId order.
    &CATEGORIES[id as usize]
}

/// Share of the full course scale, 0–100.
pub fn difficulty_percentage(level: u8) -> f32 {
    f32::from(level) / f32::from(MAX_LEVEL) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DifficultyLabel {
    Beginner,
    Elementary,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLabel {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage <= 20.0 {
            DifficultyLabel::Beginner
        } else if percentage <= 40.0 {
            DifficultyLabel::Elementary
        } else if percentage <= 60.0 {
            DifficultyLabel::Intermediate
        } else if percentage <= 80.0 {
            DifficultyLabel::Advanced
        } else {
            DifficultyLabel::Expert
        }
    }
}

impl std::fmt::Display for DifficultyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyLabel::Beginner     => write!(f, "Beginner"),
            DifficultyLabel::Elementary   => write!(f, "Elementary"),
            DifficultyLabel::Intermediate => write!(f, "Intermediate"),
            DifficultyLabel::Advanced     => write!(f, "Advanced"),
            DifficultyLabel::Expert       => write!(f, "Expert"),
        }
    }
}
