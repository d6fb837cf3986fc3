//! Inference - the Bayesian machinery of the classifier.
//!
//! - `likelihood` - how informative a single answer is (the one calibration point)
//! - `prior` - building the starting belief from contextual signals
//! - `posterior` - sequential replay of the answer history
//! - `selector` - greedy next-question choice by expected information gain

mod likelihood;
mod posterior;
mod prior;
mod selector;

pub use likelihood::{answer_likelihood, SHARPENING_GAMMA};
pub use posterior::{bayes_step, replay, ReplayOutcome};
pub use prior::{build_prior, FocusArea, TraitMap, TRAIT_BONUS};
pub use selector::{pick_next, Selection, GAIN_EPSILON, MARGINAL_FALLBACK};
