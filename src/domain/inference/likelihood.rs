//! Likelihood model - probability of observing an answer under an archetype.

use crate::domain::foundation::AnswerLevel;
use crate::domain::probability::{clamp, PROB_EPSILON};

/// Sharpening exponent applied to the blended likelihood.
///
/// Values above 1 pull likelihoods away from 0.5, so a single answer moves
/// the posterior more decisively than the raw linear blend would. Users
/// rarely land exactly on neutral by accident; the transform encodes that.
pub const SHARPENING_GAMMA: f64 = 1.6;

/// Returns P(answer | archetype) given the question's yes-affinity for that
/// archetype.
///
/// The computation is the engine's single calibration point:
///
/// 1. Blend the level's credence weight `w` with the affinity `y`:
///    `r = w·y + (1-w)·(1-y)`
/// 2. Sharpen: `s = r^γ / (r^γ + (1-r)^γ)`
/// 3. Clamp into `(ε, 1-ε)`
///
/// Stable for every answer level and every affinity in (0, 1); the result is
/// always strictly inside (0, 1).
pub fn answer_likelihood(level: AnswerLevel, yes_affinity: f64) -> f64 {
    let w = level.weight();
    let blended = w * yes_affinity + (1.0 - w) * (1.0 - yes_affinity);
    let r = clamp(blended, PROB_EPSILON, 1.0 - PROB_EPSILON);

    let sharpened = r.powf(SHARPENING_GAMMA);
    let complement = (1.0 - r).powf(SHARPENING_GAMMA);
    let s = sharpened / (sharpened + complement);

    clamp(s, PROB_EPSILON, 1.0 - PROB_EPSILON)
}
