use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::PracticeError;
use crate::practice_engine::{
    adjust,
    models::{CategoryId, PracticeRequest, Problem, ProblemBatch, SubtractionGuard},
    policy::{CategoryPolicy, GeneratorConfig, PolicyTable},
};

/// A candidate drill after the shaping passes, with its computed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    /// `[base, step_1, .., step_k]`
    pub numbers: Vec<i32>,
    pub correct_answer: u32,
    pub accepted: bool,
}

/// Run the sign-balancing pass and the subtraction guard over `numbers`,
/// then score the result against the policy's band.
pub fn settle(policy: &CategoryPolicy, guard: SubtractionGuard, mut numbers: Vec<i32>) -> Settled {
    adjust::balance_signs(&mut numbers);
    let ordered = match guard {
        SubtractionGuard::AdjacentPair => {
            adjust::guard_adjacent_pairs(&mut numbers);
            true
        }
        SubtractionGuard::RunningTotal => adjust::guard_running_total(&mut numbers),
    };
    let correct_answer = policy.answer.apply(adjust::signed_sum(&numbers));
    Settled {
        accepted: ordered && policy.band.accepts(correct_answer),
        numbers,
        correct_answer,
    }
}

/// Draw a raw candidate: a positive base and `step_count` steps with
/// independent 50/50 signs.
fn draw_candidate<R: Rng>(rng: &mut R, policy: &CategoryPolicy) -> Vec<i32> {
    let mut numbers = Vec::with_capacity(policy.step_count + 1);
    numbers.push(policy.base.draw(rng).abs());
    for _ in 0..policy.step_count {
        let magnitude = policy.step.draw(rng);
        numbers.push(if rng.gen_bool(0.5) { magnitude } else { -magnitude });
    }
    numbers
}

/// Generate one problem by rejection sampling.
///
/// Up to `max_attempts` candidates are drawn; the first one whose answer
/// lands in the band wins. If none does, the last candidate is kept with
/// `within_band = false` and a warning is logged.
pub fn generate_problem<R: Rng>(
    rng: &mut R,
    policy: &CategoryPolicy,
    guard: SubtractionGuard,
    max_attempts: u8,
    id: u32,
) -> Problem {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0u8;
    let settled = loop {
        attempts += 1;
        let settled = settle(policy, guard, draw_candidate(rng, policy));
        if settled.accepted || attempts >= max_attempts {
            break settled;
        }
    };

    if !settled.accepted {
        warn!(
            target: "abacus_drill_gen",
            category = %policy.id,
            problem_id = id,
            answer = settled.correct_answer,
            band_min = policy.band.min,
            band_max = policy.band.max,
            %guard,
            "Retry budget exhausted; keeping out-of-band problem"
        );
    }

    let (base, rows) = settled
        .numbers
        .split_first()
        .map(|(base, rows)| (base.unsigned_abs(), rows.to_vec()))
        .unwrap_or_default();

    Problem {
        id,
        base_number: base,
        rows,
        correct_answer: settled.correct_answer,
        attempts,
        within_band: settled.accepted,
    }
}

/// Batch generator bound to one configuration and policy table.
///
/// Immutable after construction, so one instance can serve any number of
/// concurrent practice sessions.
#[derive(Debug, Clone)]
pub struct PracticeGenerator {
    config: GeneratorConfig,
    table: PolicyTable,
}

impl Default for PracticeGenerator {
    fn default() -> Self {
        PracticeGenerator {
            config: GeneratorConfig::default(),
            table: PolicyTable::default(),
        }
    }
}

impl PracticeGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, PracticeError> {
        config.validate()?;
        let table = config.policy_table()?;
        Ok(PracticeGenerator { config, table })
    }

    /// Build from [`GeneratorConfig::load_from_env`].
    pub fn from_env() -> Self {
        // load_from_env only hands back validated configs or the defaults.
        Self::new(GeneratorConfig::load_from_env()).unwrap_or_default()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn policy(&self, category: CategoryId) -> &CategoryPolicy {
        self.table.policy(category)
    }

    /// Generate a full batch, seeded from the request or from entropy.
    pub fn generate(&self, request: PracticeRequest) -> ProblemBatch {
        let mut rng: StdRng = match request.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        debug!(
            target: "abacus_drill_gen",
            category = %request.category,
            batch_size = self.config.batch_size,
            seeded = request.rng_seed.is_some(),
            "Generating practice batch"
        );
        self.generate_with_rng(&mut rng, request.category)
    }

    /// Generate a full batch from a caller-supplied random source.
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R, category: CategoryId) -> ProblemBatch {
        let policy = self.table.policy(category);
        let problems = (1..=self.config.batch_size)
            .map(|id| {
                generate_problem(
                    &mut *rng,
                    policy,
                    self.config.subtraction_guard,
                    self.config.max_attempts,
                    id,
                )
            })
            .collect();
        ProblemBatch { category, problems }
    }
}

/// Generate a batch of 100 problems with the built-in policy table.
pub fn generate_problems(request: PracticeRequest) -> ProblemBatch {
    PracticeGenerator::default().generate(request)
}

/// Same as [`generate_problems`], for callers holding a raw category label.
pub fn generate_problems_for_label(
    label: &str,
    rng_seed: Option<u64>,
) -> Result<ProblemBatch, PracticeError> {
    let category: CategoryId = label.parse()?;
    Ok(generate_problems(PracticeRequest { category, rng_seed }))
}
