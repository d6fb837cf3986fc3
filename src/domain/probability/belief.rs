//! Belief distribution over archetypes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Archetype, ARCHETYPE_COUNT};

use super::{clamp, PROB_EPSILON};

/// A probability distribution over the 5 archetypes.
///
/// Backed by a fixed array in canonical archetype order, so iteration and
/// argmax are deterministic — no reliance on hash iteration order.
///
/// # Invariants
///
/// - Entries sum to 1 within floating tolerance
/// - Every entry is finite and strictly positive (a stabilizing floor keeps
///   any archetype from being locked out by an exact zero)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Belief([f64; ARCHETYPE_COUNT]);

impl Belief {
    /// Returns the uniform distribution.
    pub fn uniform() -> Self {
        Self([1.0 / ARCHETYPE_COUNT as f64; ARCHETYPE_COUNT])
    }

    /// Normalizes raw non-negative scores into a distribution.
    ///
    /// # Edge Cases
    /// - Non-finite or negative entries are treated as 0
    /// - A zero (or non-positive) total falls back to uniform rather than
    ///   dividing by zero
    pub fn normalized(scores: [f64; ARCHETYPE_COUNT]) -> Self {
        let clipped = scores.map(|s| if s.is_finite() { s.max(0.0) } else { 0.0 });
        let total: f64 = clipped.iter().sum();
        if !(total > 0.0) {
            return Self::uniform();
        }

        // Floor each entry away from exact zero, then renormalize.
        let mut probs = clipped.map(|s| clamp(s / total, PROB_EPSILON, 1.0));
        let renorm: f64 = probs.iter().sum();
        for p in &mut probs {
            *p /= renorm;
        }
        Self(probs)
    }

    /// Builds a distribution by evaluating `f` for every archetype, then
    /// normalizing.
    pub fn normalized_from(f: impl Fn(Archetype) -> f64) -> Self {
        let mut scores = [0.0; ARCHETYPE_COUNT];
        for (i, archetype) in Archetype::all().iter().enumerate() {
            scores[i] = f(*archetype);
        }
        Self::normalized(scores)
    }

    /// Returns the probability assigned to an archetype.
    pub fn prob(&self, archetype: Archetype) -> f64 {
        self.0[archetype.order_index()]
    }

    /// Iterates `(archetype, probability)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Archetype, f64)> + '_ {
        Archetype::all().iter().map(move |a| (*a, self.prob(*a)))
    }

    /// Returns the underlying probabilities in canonical archetype order.
    pub fn as_array(&self) -> &[f64; ARCHETYPE_COUNT] {
        &self.0
    }

    /// Returns the most probable archetype and its probability.
    ///
    /// Ties resolve to the archetype earliest in canonical order, so the
    /// result is deterministic for identical distributions.
    pub fn top(&self) -> (Archetype, f64) {
        let mut best = Archetype::all()[0];
        let mut best_p = self.0[0];
        for (archetype, p) in self.iter().skip(1) {
            if p > best_p {
                best = archetype;
                best_p = p;
            }
        }
        (best, best_p)
    }

    /// Shannon entropy in bits.
    ///
    /// Zero-probability entries contribute 0 by the `0·log2(0) = 0`
    /// convention, never NaN.
    pub fn entropy_bits(&self) -> f64 {
        self.0
            .iter()
            .filter(|p| **p > 0.0)
            .map(|p| -p * p.log2())
            .sum()
    }
}

impl Default for Belief {
    fn default() -> Self {
        Self::uniform()
    }
}
