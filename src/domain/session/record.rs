//! Answer record - one entry in the ordered answer log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnswerLevel, QuestionId, Timestamp};

/// An ordered log entry for one answered question.
///
/// The question text is denormalized into the record so evidence displays
/// survive bank revisions. `info_delta` is the entropy reduction this answer
/// contributed at the time it was applied; deltas are path-dependent, so the
/// aggregate rewrites them on every replay rather than treating them as
/// independently stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    question_id: QuestionId,
    question_text: String,
    answer: AnswerLevel,
    info_delta: f64,
    answered_at: Timestamp,
}

impl AnswerRecord {
    /// Creates a record for a just-applied answer. The delta is filled in by
    /// the replay that follows.
    pub(crate) fn new(question_id: QuestionId, question_text: String, answer: AnswerLevel) -> Self {
        Self {
            question_id,
            question_text,
            answer,
            info_delta: 0.0,
            answered_at: Timestamp::now(),
        }
    }

    /// Returns the answered question's id.
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    /// Returns the question text as asked.
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Returns the answer given.
    pub fn answer(&self) -> AnswerLevel {
        self.answer
    }

    /// Returns the entropy reduction attributed to this answer.
    pub fn info_delta(&self) -> f64 {
        self.info_delta
    }

    /// Returns when the answer was recorded.
    pub fn answered_at(&self) -> &Timestamp {
        &self.answered_at
    }

    pub(crate) fn set_info_delta(&mut self, delta: f64) {
        self.info_delta = delta;
    }
}
