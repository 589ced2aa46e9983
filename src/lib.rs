//! # abacus_drill_gen
//!
//! An offline, deterministic generator for abacus mental-arithmetic drills.
//!
//! Each drill is a positive base number followed by four signed steps the
//! learner moves on the abacus, plus the expected answer. Five categories
//! (A–E) control the digit ranges, how the answer is read off, and which
//! answers are acceptable.
//!
//! ## How it works
//!
//! 1. Build a [`PracticeRequest`] with a category and an optional RNG seed.
//! 2. Call [`generate_problems`] — for each of the 100 problems the engine
//!    draws a candidate, balances the signs of the steps, keeps subtractions
//!    within reach, computes the answer, and redraws (up to 10 times) until
//!    the answer lands in the category's band.
//! 3. The returned [`ProblemBatch`] holds the problems in order, ready to
//!    render or to grade against.
//!
//! ## Key features
//!
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the exact same batch.
//! - **Data-driven rules**: digit ranges, bands, retry cap and batch size live
//!   in a [`PolicyTable`] / [`GeneratorConfig`] that can be overridden from TOML.
//! - **Visible degradation**: a problem that never hit its band is still
//!   returned, marked `within_band: false`, and logged with `tracing`.
//!
//! ## Quick start
//!
//! ```rust
//! use abacus_drill_gen::{format_number, generate_problems, CategoryId, PracticeRequest};
//!
//! let batch = generate_problems(PracticeRequest::seeded(CategoryId::A, 42));
//! assert_eq!(batch.problems.len(), 100);
//!
//! let first = &batch.problems[0];
//! let rows: Vec<String> = first.rows.iter().map(|&r| format_number(r)).collect();
//! println!("{} {} = {}", first.base_number, rows.join(" "), first.correct_answer);
//! ```

pub mod client_adapter;
pub mod error;
pub mod practice_engine;

// Convenience re-exports so callers can use `abacus_drill_gen::generate_problems`
// directly without reaching into `practice_engine::`.
pub use client_adapter::{answer_key, to_client_payload};
pub use error::PracticeError;
pub use practice_engine::{
    categories, category, format_number, generate_problems, generate_problems_for_label, grade,
    AnswerBand, AnswerTransform, Category, CategoryId, CategoryPolicy, DifficultyLabel,
    DigitRange, GeneratorConfig, PolicyTable, PracticeGenerator, PracticeRequest, Problem,
    ProblemBatch, ScoreCard, SubtractionGuard,
};

#[cfg(test)]
mod tests;
