//! Display helpers shared by the client adapter and the demo.

use crate::practice_engine::models::Problem;

/// Render a step for display: the bare decimal value. Positive numbers get
/// no `+`; negative numbers keep their `-`.
pub fn format_number(n: i32) -> String {
    n.to_string()
}

/// Rows rendered one per entry, ready to stack vertically on a practice card.
pub fn rows_str(problem: &Problem) -> Vec<String> {
    problem.rows.iter().map(|&r| format_number(r)).collect()
}

/// Whole drill on one line (e.g. "12 5 -3 8 -9").
pub fn drill_str(problem: &Problem) -> String {
    problem
        .numbers()
        .into_iter()
        .map(format_number)
        .collect::<Vec<_>>()
        .join(" ")
}
