//! Question entity with per-archetype yes-affinities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{
    Archetype, QuestionId, ValidationError, ARCHETYPE_COUNT,
};

/// A single yes/no-ish question with a per-archetype yes-affinity.
///
/// The yes-affinity is P(strong yes | archetype) - a probability-like value
/// per archetype, not required to sum to 1 across archetypes. Affinities must
/// lie strictly inside (0, 1): an exact 0 or 1 would make a single answer
/// infinitely decisive and break the posterior update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct Question {
    id: QuestionId,
    text: String,
    affinities: [f64; ARCHETYPE_COUNT],
}

impl Question {
    /// Creates a question, validating text and affinities.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    /// - `OutOfRange` if any affinity lies outside the open interval (0, 1)
    pub fn try_new(
        id: QuestionId,
        text: impl Into<String>,
        affinities: [f64; ARCHETYPE_COUNT],
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("question_text"));
        }
        for (archetype, affinity) in Archetype::all().iter().zip(affinities) {
            if !affinity.is_finite() || affinity <= 0.0 || affinity >= 1.0 {
                return Err(ValidationError::out_of_range(
                    format!("yes_affinity[{}]", archetype),
                    0.0,
                    1.0,
                    affinity,
                ));
            }
        }
        Ok(Self { id, text, affinities })
    }

    /// Returns the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the yes-affinity for an archetype.
    pub fn yes_affinity(&self, archetype: Archetype) -> f64 {
        self.affinities[archetype.order_index()]
    }
}

/// Wire representation used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawQuestion {
    id: String,
    text: String,
    yes_affinity: BTreeMap<Archetype, f64>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ValidationError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let id = QuestionId::try_new(raw.id)?;
        let mut affinities = [0.0; ARCHETYPE_COUNT];
        for archetype in Archetype::all() {
            let affinity = raw.yes_affinity.get(archetype).copied().ok_or_else(|| {
                ValidationError::invalid_format(
                    "yes_affinity",
                    format!("question '{}' is missing archetype '{:?}'", id, archetype),
                )
            })?;
            affinities[archetype.order_index()] = affinity;
        }
        Question::try_new(id, raw.text, affinities)
    }
}

impl From<Question> for RawQuestion {
    fn from(q: Question) -> Self {
        let yes_affinity = Archetype::all()
            .iter()
            .map(|a| (*a, q.yes_affinity(*a)))
            .collect();
        RawQuestion {
            id: q.id.as_str().to_string(),
            text: q.text,
            yes_affinity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::try_new(s).unwrap()
    }

    #[test]
    fn accepts_affinities_strictly_inside_unit_interval() {
        let q = Question::try_new(qid("q_a"), "Do you plan ahead?", [0.1, 0.5, 0.9, 0.3, 0.7]);
        assert!(q.is_ok());
    }

    #[test]
    fn rejects_boundary_affinities() {
        for bad in [0.0, 1.0, -0.2, 1.3, f64::NAN] {
            let result =
                Question::try_new(qid("q_a"), "text", [bad, 0.5, 0.5, 0.5, 0.5]);
            assert!(result.is_err(), "affinity {bad} should be rejected");
        }
    }

    #[test]
    fn rejects_blank_text() {
        let result = Question::try_new(qid("q_a"), "  ", [0.5; ARCHETYPE_COUNT]);
        assert!(result.is_err());
    }

    #[test]
    fn affinity_lookup_follows_archetype() {
        let q = Question::try_new(qid("q_a"), "text", [0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(q.yes_affinity(Archetype::Analyst), 0.1);
        assert_eq!(q.yes_affinity(Archetype::Anchor), 0.5);
    }

    #[test]
    fn deserializes_from_yaml_map() {
        let yaml = r#"
id: q_routine
text: "Does a predictable routine make you feel at ease?"
yes_affinity:
  analyst: 0.6
  builder: 0.5
  connector: 0.45
  explorer: 0.15
  anchor: 0.85
"#;
        let q: Question = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(q.id().as_str(), "q_routine");
        assert_eq!(q.yes_affinity(Archetype::Anchor), 0.85);
    }

    #[test]
    fn deserialization_rejects_missing_archetype() {
        let yaml = r#"
id: q_partial
text: "Partial affinity map?"
yes_affinity:
  analyst: 0.6
"#;
        let result: Result<Question, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
