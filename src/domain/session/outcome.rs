//! Session outcome - the terminal result of a classification.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Archetype;

use super::AnswerRecord;

/// How many answer records the evidence list carries.
pub const EVIDENCE_LIMIT: usize = 5;

/// The result exposed once a session reaches `Done`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// The inferred archetype.
    pub archetype: Archetype,
    /// Posterior probability of the inferred archetype.
    pub confidence: f64,
    /// Recommended next actions for the inferred archetype.
    pub next_steps: Vec<String>,
    /// The answers that contributed the most entropy reduction, largest
    /// first. At most [`EVIDENCE_LIMIT`] records; equal deltas keep answer
    /// order.
    pub evidence: Vec<AnswerRecord>,
}

impl SessionOutcome {
    pub(crate) fn new(archetype: Archetype, confidence: f64, records: &[AnswerRecord]) -> Self {
        let mut evidence: Vec<AnswerRecord> = records.to_vec();
        evidence.sort_by(|a, b| {
            b.info_delta()
                .partial_cmp(&a.info_delta())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        evidence.truncate(EVIDENCE_LIMIT);

        Self {
            archetype,
            confidence,
            next_steps: archetype.next_steps().iter().map(|s| s.to_string()).collect(),
            evidence,
        }
    }
}
