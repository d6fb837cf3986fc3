//! Offline Monte Carlo harness for validating engine calibration.
//!
//! Simulates full ask/answer/update/stop loops against a question bank with
//! answers sampled from the engine's own likelihood model, then reports how
//! often the inferred archetype matches the ground truth and how many
//! questions sessions needed. Runs are fully deterministic for a given seed.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnswerLevel, Archetype, EngineError, SessionId, ARCHETYPE_COUNT,
};
use crate::domain::inference::answer_likelihood;
use crate::domain::probability::Belief;
use crate::domain::question::{Question, QuestionBank};
use crate::domain::session::{ClassificationSession, LoopConfig};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated sessions.
    pub trials: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Stop policy applied to every simulated session.
    pub loop_config: LoopConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 200,
            seed: 42,
            loop_config: LoopConfig::default(),
        }
    }
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Sessions simulated.
    pub trials: usize,
    /// Sessions whose inferred archetype matched the ground truth.
    pub correct: usize,
    /// Questions asked across all sessions.
    pub total_questions: usize,
    /// Sum of terminal confidences across all sessions.
    pub total_confidence: f64,
    /// `confusion[truth][predicted]` counts, indexed in canonical
    /// archetype order.
    pub confusion: [[usize; ARCHETYPE_COUNT]; ARCHETYPE_COUNT],
}

impl SimulationReport {
    fn new() -> Self {
        Self {
            trials: 0,
            correct: 0,
            total_questions: 0,
            total_confidence: 0.0,
            confusion: [[0; ARCHETYPE_COUNT]; ARCHETYPE_COUNT],
        }
    }

    /// Fraction of sessions classified correctly.
    pub fn accuracy(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.correct as f64 / self.trials as f64
    }

    /// Mean questions asked per session.
    pub fn mean_questions(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_questions as f64 / self.trials as f64
    }

    /// Mean terminal confidence per session.
    pub fn mean_confidence(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.total_confidence / self.trials as f64
    }
}

/// Runs a deterministic calibration sweep against a bank.
///
/// Ground-truth archetypes rotate through the canonical order so every
/// archetype gets equal coverage; answers are sampled from the likelihood
/// model conditioned on the truth. Sessions start from a uniform prior - the
/// harness measures what the questions alone can recover.
pub fn run_calibration(
    bank: &QuestionBank,
    config: &SimulationConfig,
) -> Result<SimulationReport, EngineError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut report = SimulationReport::new();

    for trial in 0..config.trials {
        let truth = Archetype::all()[trial % ARCHETYPE_COUNT];
        let mut session = ClassificationSession::new(
            SessionId::new(),
            Belief::uniform(),
            config.loop_config.clone(),
        );

        while !session.is_done() {
            let selection = session.next_question(bank);
            let Some(question) = selection.question else {
                break;
            };
            let question_id = question.id().clone();
            let answer = sample_answer(&mut rng, question, truth);
            session.answer(bank, &question_id, answer)?;
        }

        let (predicted, confidence) = session.posterior().top();
        report.trials += 1;
        report.total_questions += session.asked_count();
        report.total_confidence += confidence;
        report.confusion[truth.order_index()][predicted.order_index()] += 1;
        if predicted == truth {
            report.correct += 1;
        }
    }

    tracing::debug!(
        trials = report.trials,
        accuracy = report.accuracy(),
        mean_questions = report.mean_questions(),
        "calibration sweep complete"
    );
    Ok(report)
}

/// Samples an answer level from the likelihood model conditioned on the
/// ground-truth archetype.
fn sample_answer(rng: &mut ChaCha8Rng, question: &Question, truth: Archetype) -> AnswerLevel {
    let affinity = question.yes_affinity(truth);
    let weights: Vec<f64> = AnswerLevel::all()
        .iter()
        .map(|level| answer_likelihood(*level, affinity))
        .collect();
    let total: f64 = weights.iter().sum();

    let mut draw = rng.gen::<f64>() * total;
    for (level, weight) in AnswerLevel::all().iter().zip(&weights) {
        draw -= weight;
        if draw <= 0.0 {
            return *level;
        }
    }
    // Floating residue can leave draw marginally above zero after the loop.
    AnswerLevel::StrongNo
}
