use serde_json::{json, Map, Value};

use crate::practice_engine::{catalog, helpers::rows_str, models::{Problem, ProblemBatch}};

/// Build the card entry for one problem. The expected answer is left out so
/// the payload can go straight to the browser.
fn problem_card(problem: &Problem) -> Value {
    json!({
        "id": problem.id,
        "baseNumber": problem.base_number,
        "rows": rows_str(problem),
    })
}

/// Build the category header shown above the practice grid.
fn category_header(batch: &ProblemBatch) -> Value {
    let category = catalog::category(batch.category);
    json!({
        "id": batch.category.as_str(),
        "name": category.name,
        "level": category.level,
        "description": category.description,
        "difficulty": category.difficulty_label().to_string(),
        "difficultyPercentage": category.difficulty_percentage(),
    })
}

/// Map a `ProblemBatch` to the practice-screen JSON: category header plus one
/// card per problem, rows pre-formatted for display, answers withheld.
pub fn to_client_payload(batch: &ProblemBatch) -> Value {
    let problems: Vec<Value> = batch.problems.iter().map(problem_card).collect();
    json!({
        "category": category_header(batch),
        "total": batch.problems.len(),
        "problems": problems,
    })
}

/// Answers keyed by problem id (as strings, for JSON object keys), kept
/// server-side for grading.
pub fn answer_key(batch: &ProblemBatch) -> Value {
    let mut key = Map::with_capacity(batch.problems.len());
    for problem in &batch.problems {
        key.insert(problem.id.to_string(), json!(problem.correct_answer));
    }
    Value::Object(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::models::CategoryId;

    fn batch() -> ProblemBatch {
        ProblemBatch {
            category: CategoryId::E,
            problems: vec![
                Problem {
                    id: 1,
                    base_number: 20,
                    rows: vec![5, -3, 8, -9],
                    correct_answer: 21,
                    attempts: 1,
                    within_band: true,
                },
                Problem {
                    id: 2,
                    base_number: 14,
                    rows: vec![-2, 7, -1, 3],
                    correct_answer: 21,
                    attempts: 2,
                    within_band: true,
                },
            ],
        }
    }

    #[test]
    fn payload_hides_answers_and_formats_rows() {
        let payload = to_client_payload(&batch());
        assert_eq!(payload["total"], 2);
        assert_eq!(payload["category"]["id"], "E");
        assert_eq!(payload["category"]["level"], 5);

        let first = &payload["problems"][0];
        assert_eq!(first["baseNumber"], 20);
        assert_eq!(first["rows"], json!(["5", "-3", "8", "-9"]));
        assert!(first.get("correctAnswer").is_none());
        assert!(!payload.to_string().contains("correct"));
    }

    #[test]
    fn answer_key_maps_ids_to_answers() {
        let key = answer_key(&batch());
        assert_eq!(key["1"], 21);
        assert_eq!(key["2"], 21);
        assert_eq!(key.as_object().map(|m| m.len()), Some(2));
    }
}
