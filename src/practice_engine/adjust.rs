//! Candidate-shaping passes applied between drawing numbers and scoring them.
//!
//! A candidate is `[base, step_1, .., step_k]`. None of these passes change
//! how many entries there are; they only flip signs, swap magnitudes between
//! neighbours, or reorder steps.

/// Minimum number of positive and of negative steps in a balanced drill.
pub const MIN_EACH_SIGN: usize = 2;

/// Force the base positive and nudge step signs toward at least
/// [`MIN_EACH_SIGN`] positives and negatives.
///
/// Counts are taken once up front and updated as signs flip. A negative step
/// becomes positive while positives are short; otherwise a positive step
/// becomes negative while negatives are short and positives are in surplus.
/// Magnitudes and order never change.
pub fn balance_signs(numbers: &mut [i32]) {
    let Some((base, steps)) = numbers.split_first_mut() else {
        return;
    };
    *base = base.abs();

    let mut positives = steps.iter().filter(|&&n| n > 0).count();
    let mut negatives = steps.iter().filter(|&&n| n < 0).count();

    for step in steps.iter_mut() {
        if positives < MIN_EACH_SIGN && *step < 0 {
            *step = step.abs();
            positives += 1;
            negatives -= 1;
        } else if negatives < MIN_EACH_SIGN && *step > 0 && positives > MIN_EACH_SIGN {
            *step = -step.abs();
            negatives += 1;
            positives -= 1;
        }
    }
}

/// Adjacent-pair subtraction guard.
///
/// Walking left to right, a negative entry whose magnitude exceeds its
/// predecessor's swaps magnitudes with it: the predecessor becomes the
/// positive larger value and the entry subtracts the smaller one. Only
/// neighbours are compared, so a running total further along can still dip
/// below zero.
pub fn guard_adjacent_pairs(numbers: &mut [i32]) {
    for i in 1..numbers.len() {
        let current = numbers[i];
        let previous = numbers[i - 1];
        if current < 0 && current.abs() > previous.abs() {
            numbers[i - 1] = current.abs();
            numbers[i] = -previous.abs();
        }
    }
}

/// Running-total subtraction guard.
///
/// Steps are emitted in their drawn order, except that a negative step that
/// would take the running total below zero waits behind the next pending
/// positive step. Returns `false` when no positive step is left to pull
/// forward, in which case the steps are left in the order reached so far.
/// The multiset of steps, and therefore the sum, is unchanged.
pub fn guard_running_total(numbers: &mut [i32]) -> bool {
    let Some((&base, steps)) = numbers.split_first() else {
        return true;
    };
    let mut pending: Vec<i32> = steps.to_vec();
    let mut ordered: Vec<i32> = Vec::with_capacity(pending.len());
    let mut total = base;
    let mut ok = true;

    while !pending.is_empty() {
        let next = pending[0];
        let pick = if next < 0 && total + next < 0 {
            match pending.iter().position(|&n| n > 0) {
                Some(idx) => idx,
                None => {
                    ok = false;
                    break;
                }
            }
        } else {
            0
        };
        let step = pending.remove(pick);
        total += step;
        ordered.push(step);
    }
    ordered.append(&mut pending);
    numbers[1..].copy_from_slice(&ordered);
    ok
}

pub fn signed_sum(numbers: &[i32]) -> i32 {
    numbers.iter().sum()
}

/// True if no prefix of `numbers` sums below zero.
pub fn running_total_never_negative(numbers: &[i32]) -> bool {
    numbers
        .iter()
        .scan(0i32, |total, &n| {
            *total += n;
            Some(*total)
        })
        .all(|t| t >= 0)
}
