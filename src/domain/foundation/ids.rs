//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a classification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Stable identifier for a question in the question bank.
///
/// Question ids are plain strings supplied with the bank (e.g. `"q_deadline"`)
/// and must stay stable across bank revisions: answer histories reference
/// questions by id, and selection tie-breaking orders candidates by id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a QuestionId, rejecting empty strings.
    pub fn try_new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("question_id"));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_round_trips_through_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn question_id_rejects_empty() {
        assert!(QuestionId::try_new("").is_err());
        assert!(QuestionId::try_new("   ").is_err());
    }

    #[test]
    fn question_id_accepts_and_displays() {
        let id = QuestionId::try_new("q_deadline").unwrap();
        assert_eq!(id.as_str(), "q_deadline");
        assert_eq!(format!("{}", id), "q_deadline");
    }

    #[test]
    fn question_ids_order_lexicographically() {
        let a = QuestionId::try_new("q_a").unwrap();
        let b = QuestionId::try_new("q_b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn question_id_serializes_transparently() {
        let id = QuestionId::try_new("q_focus").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"q_focus\"");
    }
}
