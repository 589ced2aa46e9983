//! Tour of every practice category.
//!
//! Run with: `cargo run --example demo`
//!
//! For each category the demo prints the picker metadata, the first few
//! problems of a seeded batch, and how many problems ran out of retries.
//! It then regenerates category A with the running-total guard to show the
//! difference in partial totals.
//!
//! Logging:
//! - `LOG_LEVEL` sets the filter (default `info,abacus_drill_gen=warn`; try
//!   `abacus_drill_gen=debug` to see every batch and exhaustion event).
//! - `LOG_FORMAT=json` switches to structured JSON output.
//! - `ABACUS_POLICY_PATH` points at a TOML file overriding the policy table.

use abacus_drill_gen::{
    categories, format_number, CategoryId, practice_engine::helpers::drill_str, GeneratorConfig,
    PracticeGenerator, PracticeRequest, Problem, ScoreCard, SubtractionGuard,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info,abacus_drill_gen=warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

fn print_problem(p: &Problem) {
    let rows: Vec<String> = p.rows.iter().map(|&r| format_number(r)).collect();
    let flag = if p.within_band { " " } else { "!" };
    println!(
        "  [{flag}] #{:<3} {:>3} | {:<16} = {:<3} (attempts: {})",
        p.id,
        p.base_number,
        rows.join(" "),
        p.correct_answer,
        p.attempts
    );
}

fn main() {
    init_tracing();

    let generator = PracticeGenerator::from_env();
    println!(
        "Batch size {}  Max attempts {}  Guard {}",
        generator.config().batch_size,
        generator.config().max_attempts,
        generator.config().subtraction_guard
    );

    for category in categories() {
        let policy = generator.policy(category.id);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!(
            "  [{}] {} — Level {} • {} ({:.0}%)",
            category.id,
            category.name,
            category.level,
            category.difficulty_label(),
            category.difficulty_percentage()
        );
        println!("  {}", category.description);
        println!(
            "  Answers accepted: {}..={}",
            policy.band.min, policy.band.max
        );
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let batch = generator.generate(PracticeRequest::seeded(category.id, 2024));
        for p in batch.problems.iter().take(5) {
            print_problem(p);
        }
        println!(
            "  … {} problems, {} kept after exhausting retries",
            batch.len(),
            batch.out_of_band().count()
        );

        // A learner who gets every fifth problem wrong.
        let mut card = ScoreCard::new();
        for p in &batch.problems {
            let answer = if p.id % 5 == 0 { p.correct_answer + 1 } else { p.correct_answer };
            card.record(p, answer);
        }
        println!("  Sample session accuracy: {:.0}%", card.accuracy_percent());
        println!();
    }

    let running = PracticeGenerator::new(GeneratorConfig {
        subtraction_guard: SubtractionGuard::RunningTotal,
        ..generator.config().clone()
    });
    match running {
        Ok(running) => {
            let adjacent = generator.generate(PracticeRequest::seeded(CategoryId::A, 7));
            let guarded = running.generate(PracticeRequest::seeded(CategoryId::A, 7));
            println!("Category A, adjacent-pair vs running-total guard:");
            for (a, g) in adjacent.problems.iter().zip(&guarded.problems).take(5) {
                println!(
                    "  {:<20} totals {:?}   |   {:<20} totals {:?}",
                    drill_str(a),
                    a.running_totals(),
                    drill_str(g),
                    g.running_totals()
                );
            }
        }
        Err(e) => eprintln!("running-total config rejected: {e}"),
    }
}
