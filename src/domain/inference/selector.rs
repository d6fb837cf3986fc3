//! Question selector - greedy choice by expected information gain.

use std::collections::HashSet;

use crate::domain::foundation::{AnswerLevel, QuestionId};
use crate::domain::probability::{clamp, Belief, PROB_EPSILON};
use crate::domain::question::{Question, QuestionBank};

use super::{answer_likelihood, bayes_step};

/// Two gains within this distance count as tied; ties break to the
/// lexicographically smallest question id.
pub const GAIN_EPSILON: f64 = 1e-9;

/// Marginal answer probability used when the computed value is non-finite.
pub const MARGINAL_FALLBACK: f64 = 0.2;

/// Result of a selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// The chosen question, or None if every question has been answered.
    pub question: Option<&'a Question>,
    /// Expected entropy reduction from asking it. 0 when the selection fell
    /// back past degenerate gains.
    pub expected_gain: f64,
}

/// Picks the unanswered question with the largest expected information gain.
///
/// Per candidate, the expected posterior entropy marginalizes over the 5
/// possible answers: `E[H] = Σ_a P(a)·H(posterior|a)` with
/// `P(a) ∝ Σ_t posterior[t]·likelihood(a, affinity[t])` renormalized across
/// levels, and `gain = H(posterior) - E[H]`.
///
/// Selection is deterministic for identical inputs: gains tied within
/// [`GAIN_EPSILON`] resolve to the smallest question id. If every remaining
/// gain is non-positive or numerically unresolved, the lexicographically
/// smallest unanswered question is still returned with gain 0 - callers can
/// always proceed while an unanswered question exists.
pub fn pick_next<'a>(
    posterior: &Belief,
    bank: &'a QuestionBank,
    answered: &HashSet<QuestionId>,
) -> Selection<'a> {
    let h_now = posterior.entropy_bits();

    let mut best: Option<(&Question, f64)> = None;
    let mut fallback: Option<&Question> = None;

    for question in bank.iter().filter(|q| !answered.contains(q.id())) {
        if fallback.map_or(true, |f| question.id() < f.id()) {
            fallback = Some(question);
        }

        let gain = expected_gain(posterior, h_now, question);
        if !gain.is_finite() {
            continue;
        }

        best = match best {
            None => Some((question, gain)),
            Some((best_q, best_gain)) => {
                if gain > best_gain + GAIN_EPSILON {
                    Some((question, gain))
                } else if (gain - best_gain).abs() <= GAIN_EPSILON && question.id() < best_q.id()
                {
                    Some((question, gain))
                } else {
                    Some((best_q, best_gain))
                }
            }
        };
    }

    match (best, fallback) {
        (Some((question, gain)), _) if gain > GAIN_EPSILON => Selection {
            question: Some(question),
            expected_gain: gain,
        },
        (_, Some(question)) => Selection {
            question: Some(question),
            expected_gain: 0.0,
        },
        (_, None) => Selection {
            question: None,
            expected_gain: 0.0,
        },
    }
}

/// Expected entropy reduction from asking one question.
///
/// The raw marginals `Σ_t posterior[t]·likelihood(a, affinity[t])` do not sum
/// to 1 across the 5 levels (per-level likelihoods are independent, not a
/// pmf), so they are renormalized before weighting the hypothetical
/// entropies - otherwise `E[H]` is not an expectation and every gain
/// degenerates negative.
fn expected_gain(posterior: &Belief, h_now: f64, question: &Question) -> f64 {
    let mut marginals = [0.0f64; 5];
    for (i, level) in AnswerLevel::all().iter().enumerate() {
        let mut marginal: f64 = posterior
            .iter()
            .map(|(archetype, p)| p * answer_likelihood(*level, question.yes_affinity(archetype)))
            .sum();
        if !marginal.is_finite() {
            marginal = MARGINAL_FALLBACK;
        }
        marginals[i] = clamp(marginal, PROB_EPSILON, 1.0 - PROB_EPSILON);
    }
    // Total is at least 5ε, so the division below is always defined.
    let total: f64 = marginals.iter().sum();

    let mut expected_entropy = 0.0;
    for (level, marginal) in AnswerLevel::all().iter().zip(marginals) {
        let hypothetical = bayes_step(posterior, question, *level);
        expected_entropy += (marginal / total) * hypothetical.entropy_bits();
    }

    h_now - expected_entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ARCHETYPE_COUNT;

    fn question(id: &str, affinities: [f64; ARCHETYPE_COUNT]) -> Question {
        Question::try_new(
            QuestionId::try_new(id).unwrap(),
            format!("Question {id}?"),
            affinities,
        )
        .unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::try_new(s).unwrap()
    }

    #[test]
    fn prefers_the_discriminating_question() {
        let bank = QuestionBank::try_new(vec![
            question("q_flat", [0.5; ARCHETYPE_COUNT]),
            question("q_sharp", [0.9, 0.1, 0.1, 0.1, 0.1]),
        ])
        .unwrap();

        let selection = pick_next(&Belief::uniform(), &bank, &HashSet::new());
        assert_eq!(selection.question.unwrap().id(), &qid("q_sharp"));
        assert!(selection.expected_gain > 0.0);
    }

    #[test]
    fn skips_answered_questions() {
        let bank = QuestionBank::try_new(vec![
            question("q_a", [0.9, 0.1, 0.1, 0.1, 0.1]),
            question("q_b", [0.1, 0.9, 0.1, 0.1, 0.1]),
        ])
        .unwrap();

        let answered: HashSet<_> = [qid("q_a")].into_iter().collect();
        let selection = pick_next(&Belief::uniform(), &bank, &answered);
        assert_eq!(selection.question.unwrap().id(), &qid("q_b"));
    }

    #[test]
    fn exhausted_bank_returns_no_question() {
        let bank = QuestionBank::try_new(vec![question("q_a", [0.5; ARCHETYPE_COUNT])]).unwrap();
        let answered: HashSet<_> = [qid("q_a")].into_iter().collect();

        let selection = pick_next(&Belief::uniform(), &bank, &answered);
        assert_eq!(selection.question, None);
        assert_eq!(selection.expected_gain, 0.0);
    }

    #[test]
    fn degenerate_gains_fall_back_to_smallest_id() {
        // Flat affinities everywhere: no question can move the posterior, so
        // every gain collapses to ~0, but selection must still proceed.
        let bank = QuestionBank::try_new(vec![
            question("q_c", [0.5; ARCHETYPE_COUNT]),
            question("q_a", [0.5; ARCHETYPE_COUNT]),
            question("q_b", [0.5; ARCHETYPE_COUNT]),
        ])
        .unwrap();

        let selection = pick_next(&Belief::uniform(), &bank, &HashSet::new());
        assert_eq!(selection.question.unwrap().id(), &qid("q_a"));
        assert_eq!(selection.expected_gain, 0.0);
    }

    #[test]
    fn ties_break_to_the_smallest_id() {
        // Mirror-image questions have identical gain under a uniform belief.
        let bank = QuestionBank::try_new(vec![
            question("q_later", [0.8, 0.2, 0.5, 0.5, 0.5]),
            question("q_early", [0.2, 0.8, 0.5, 0.5, 0.5]),
        ])
        .unwrap();

        let selection = pick_next(&Belief::uniform(), &bank, &HashSet::new());
        assert_eq!(selection.question.unwrap().id(), &qid("q_early"));
    }

    #[test]
    fn selection_is_deterministic() {
        let bank = QuestionBank::try_new(vec![
            question("q_a", [0.7, 0.3, 0.5, 0.4, 0.6]),
            question("q_b", [0.4, 0.6, 0.3, 0.7, 0.5]),
            question("q_c", [0.5, 0.5, 0.8, 0.2, 0.5]),
        ])
        .unwrap();
        let posterior = Belief::normalized([2.0, 1.0, 3.0, 1.0, 1.0]);
        let answered = HashSet::new();

        let first = pick_next(&posterior, &bank, &answered);
        for _ in 0..10 {
            let again = pick_next(&posterior, &bank, &answered);
            assert_eq!(first.question.map(|q| q.id().clone()), again.question.map(|q| q.id().clone()));
            assert_eq!(first.expected_gain, again.expected_gain);
        }
    }

    #[test]
    fn gain_shrinks_as_belief_concentrates() {
        let bank = QuestionBank::try_new(vec![question("q_a", [0.9, 0.1, 0.1, 0.1, 0.1])]).unwrap();

        let spread = pick_next(&Belief::uniform(), &bank, &HashSet::new());
        let concentrated = pick_next(
            &Belief::normalized([50.0, 1.0, 1.0, 1.0, 1.0]),
            &bank,
            &HashSet::new(),
        );
        assert!(spread.expected_gain > concentrated.expected_gain);
    }

    #[test]
    fn near_certain_belief_still_selects_toward_analyst_probe() {
        // Sanity check that the analyst-probing question stays the pick when
        // Analyst is already leading.
        let bank = QuestionBank::try_new(vec![
            question("q_analyst", [0.9, 0.2, 0.2, 0.2, 0.2]),
            question("q_flat", [0.5; ARCHETYPE_COUNT]),
        ])
        .unwrap();
        let posterior = Belief::normalized([3.0, 1.0, 1.0, 1.0, 1.0]);

        let selection = pick_next(&posterior, &bank, &HashSet::new());
        assert_eq!(selection.question.unwrap().id(), &qid("q_analyst"));
    }
}
