//! Core practice engine — drill generation, category rules, and grading.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: category ids, requests, problems, batches |
//! | `policy`    | Per-category numeric rules and TOML-loadable generator config |
//! | `adjust`    | Sign balancing and the two subtraction guards |
//! | `generator` | Rejection-sampling problem generator and batch entry points |
//! | `helpers`   | Display formatting for rows and drills |
//! | `catalog`   | Category names, levels, and difficulty labels for the picker |
//! | `scoring`   | Grading submitted answers and session tallies |

pub mod adjust;
pub mod catalog;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod policy;
pub mod scoring;

// Re-export the public API surface so callers can use
// `practice_engine::generate_problems` without reaching into sub-modules.
pub use catalog::{categories, category, Category, DifficultyLabel};
pub use generator::{generate_problems, generate_problems_for_label, PracticeGenerator};
pub use helpers::format_number;
pub use models::{CategoryId, PracticeRequest, Problem, ProblemBatch, SubtractionGuard};
pub use policy::{
    AnswerBand, AnswerTransform, CategoryPolicy, DigitRange, GeneratorConfig, PolicyTable,
};
pub use scoring::{grade, ScoreCard};
