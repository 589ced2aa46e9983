use serde::{Deserialize, Serialize};

use crate::practice_engine::models::Problem;

/// True if the learner's answer matches the problem's expected answer.
pub fn grade(problem: &Problem, submitted: u32) -> bool {
    problem.correct_answer == submitted
}

/// Running tally for one practice session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub attempted: u32,
    pub correct: u32,
    pub missed_ids: Vec<u32>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grade one answer and fold it into the tally. Returns the verdict.
    pub fn record(&mut self, problem: &Problem, submitted: u32) -> bool {
        let ok = grade(problem, submitted);
        self.attempted += 1;
        if ok {
            self.correct += 1;
        } else {
            self.missed_ids.push(problem.id);
        }
        ok
    }

    /// Correct answers as a percentage of attempts; 0 before any attempt.
    pub fn accuracy_percent(&self) -> f32 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.correct as f32 / self.attempted as f32 * 100.0
    }
}
