//! AnswerLevel enum - the 5-point confidence scale for responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EngineError;

/// A respondent's answer on a 5-point scale from strong affirmative to
/// strong negative.
///
/// Each level carries a fixed credence weight in [0, 1]: how much a "yes"
/// reading of that level should count, independent of the question asked.
/// The weight is distinct from a question's per-archetype yes-affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLevel {
    StrongYes,
    LeanYes,
    Unsure,
    LeanNo,
    StrongNo,
}

impl AnswerLevel {
    /// Returns all answer levels, strongest affirmative first.
    pub fn all() -> &'static [AnswerLevel; 5] {
        &[
            AnswerLevel::StrongYes,
            AnswerLevel::LeanYes,
            AnswerLevel::Unsure,
            AnswerLevel::LeanNo,
            AnswerLevel::StrongNo,
        ]
    }

    /// Returns the credence weight for a "yes" reading of this level.
    pub fn weight(&self) -> f64 {
        match self {
            AnswerLevel::StrongYes => 1.0,
            AnswerLevel::LeanYes => 0.75,
            AnswerLevel::Unsure => 0.5,
            AnswerLevel::LeanNo => 0.25,
            AnswerLevel::StrongNo => 0.0,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerLevel::StrongYes => "Strong Yes",
            AnswerLevel::LeanYes => "Lean Yes",
            AnswerLevel::Unsure => "Unsure",
            AnswerLevel::LeanNo => "Lean No",
            AnswerLevel::StrongNo => "Strong No",
        }
    }

    /// Returns true if this level reads as affirmative.
    pub fn is_affirmative(&self) -> bool {
        self.weight() > 0.5
    }

    /// Returns true if this level reads as negative.
    pub fn is_negative(&self) -> bool {
        self.weight() < 0.5
    }
}

impl fmt::Display for AnswerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AnswerLevel {
    type Err = EngineError;

    /// Parses an answer token.
    ///
    /// Unrecognized tokens are a hard error rather than a default: a silently
    /// substituted weight would corrupt the posterior undetectably.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strong_yes" => Ok(AnswerLevel::StrongYes),
            "lean_yes" => Ok(AnswerLevel::LeanYes),
            "unsure" => Ok(AnswerLevel::Unsure),
            "lean_no" => Ok(AnswerLevel::LeanNo),
            "strong_no" => Ok(AnswerLevel::StrongNo),
            other => Err(EngineError::UnknownAnswer {
                token: other.to_string(),
            }),
        }
    }
}
