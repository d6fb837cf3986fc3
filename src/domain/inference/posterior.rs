//! Posterior engine - sequential replay of the answer history.

use crate::domain::foundation::AnswerLevel;
use crate::domain::probability::Belief;
use crate::domain::question::Question;

use super::answer_likelihood;

/// Result of replaying an answer history: the final posterior and the
/// entropy reduction each answer contributed, aligned with input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub posterior: Belief,
    pub deltas: Vec<f64>,
}

/// Applies a single Bayes update for one answered question.
pub fn bayes_step(current: &Belief, question: &Question, answer: AnswerLevel) -> Belief {
    Belief::normalized_from(|archetype| {
        current.prob(archetype) * answer_likelihood(answer, question.yes_affinity(archetype))
    })
}

/// Replays the full answer history from the original prior.
///
/// Strictly sequential and order-dependent: per pair, entropy before, one
/// Bayes step, entropy after, `delta = max(0, H_before - H_after)` (the
/// clamp absorbs floating noise on a no-op answer). Deltas are
/// path-dependent, which is why this always starts from the prior over the
/// FULL history - undo is "drop the last record and re-run", never an
/// inverse update.
pub fn replay(prior: &Belief, answered: &[(&Question, AnswerLevel)]) -> ReplayOutcome {
    let mut current = prior.clone();
    let mut deltas = Vec::with_capacity(answered.len());

    for (question, answer) in answered {
        let h_before = current.entropy_bits();
        let next = bayes_step(&current, question, *answer);
        let h_after = next.entropy_bits();
        deltas.push((h_before - h_after).max(0.0));
        current = next;
    }

    ReplayOutcome {
        posterior: current,
        deltas,
    }
}
