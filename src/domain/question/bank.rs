//! Validated, immutable question bank.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::{QuestionId, ValidationError};

use super::Question;

/// Errors raised while loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The process-wide, read-only set of questions sessions draw from.
///
/// Shared by all sessions; lookup is by stable question id. Construction
/// validates what the engine's correctness depends on: ids are unique and
/// every affinity already passed `Question` validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Creates a bank from validated questions, rejecting duplicate ids.
    pub fn try_new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        let mut seen: HashSet<&QuestionId> = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ValidationError::invalid_format(
                    "question_bank",
                    format!("duplicate question id '{}'", question.id()),
                ));
            }
        }
        Ok(Self { questions })
    }

    /// Loads and validates a bank from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, BankError> {
        let bank: QuestionBank = serde_yaml::from_str(yaml)?;
        // serde already validated each question; re-check bank-level rules
        // because `Deserialize` on the struct bypasses `try_new`.
        Ok(Self::try_new(bank.questions)?)
    }

    /// Looks up a question by id.
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Iterates all questions in bank order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Returns the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns true if the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

static BUILTIN: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_yaml(include_str!("bank.yaml"))
        .expect("embedded question bank must be valid")
});

/// Returns the built-in default bank embedded in the crate.
pub fn builtin_bank() -> &'static QuestionBank {
    &BUILTIN
}
