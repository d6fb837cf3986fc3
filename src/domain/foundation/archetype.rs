//! Archetype enum representing the 5 latent behavioral types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of archetypes the engine classifies over.
pub const ARCHETYPE_COUNT: usize = 5;

/// The 5 behavioral archetypes the engine converges on.
///
/// The declaration order is canonical: belief distributions iterate in this
/// order, and argmax ties resolve to the earlier archetype, which keeps every
/// downstream decision deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Analyst,
    Builder,
    Connector,
    Explorer,
    Anchor,
}

impl Archetype {
    /// Returns all archetypes in canonical order.
    pub fn all() -> &'static [Archetype; ARCHETYPE_COUNT] {
        &[
            Archetype::Analyst,
            Archetype::Builder,
            Archetype::Connector,
            Archetype::Explorer,
            Archetype::Anchor,
        ]
    }

    /// Returns the 0-based index of this archetype in the canonical order.
    pub fn order_index(&self) -> usize {
        match self {
            Archetype::Analyst => 0,
            Archetype::Builder => 1,
            Archetype::Connector => 2,
            Archetype::Explorer => 3,
            Archetype::Anchor => 4,
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Analyst => "Analyst",
            Archetype::Builder => "Builder",
            Archetype::Connector => "Connector",
            Archetype::Explorer => "Explorer",
            Archetype::Anchor => "Anchor",
        }
    }

    /// Returns the recommended next steps surfaced when a session resolves
    /// to this archetype.
    pub fn next_steps(&self) -> &'static [&'static str] {
        match self {
            Archetype::Analyst => &[
                "Block out deep-focus time for one open research question",
                "Write down the decision criteria before your next big choice",
                "Share one analysis with someone who will challenge it",
            ],
            Archetype::Builder => &[
                "Ship one small thing this week, however rough",
                "Turn a recurring idea into a concrete prototype",
                "Timebox planning so execution starts sooner",
            ],
            Archetype::Connector => &[
                "Reconnect with someone you have not spoken to in a month",
                "Offer to pair on a problem a colleague is stuck on",
                "Schedule the conversation you have been putting off",
            ],
            Archetype::Explorer => &[
                "Try a tool or method you have never used before",
                "Spend an afternoon on a topic outside your field",
                "Say yes to the unfamiliar option at the next fork",
            ],
            Archetype::Anchor => &[
                "Document the routine that keeps your week steady",
                "Identify the one commitment you should protect",
                "Check in on the long-running project others depend on",
            ],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_5_archetypes() {
        assert_eq!(Archetype::all().len(), ARCHETYPE_COUNT);
    }

    #[test]
    fn order_index_matches_position_in_all() {
        for (i, archetype) in Archetype::all().iter().enumerate() {
            assert_eq!(archetype.order_index(), i);
        }
    }

    #[test]
    fn every_archetype_has_next_steps() {
        for archetype in Archetype::all() {
            assert!(!archetype.next_steps().is_empty());
        }
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&Archetype::Analyst).unwrap(),
            "\"analyst\""
        );
        assert_eq!(
            serde_json::to_string(&Archetype::Anchor).unwrap(),
            "\"anchor\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let archetype: Archetype = serde_json::from_str("\"explorer\"").unwrap();
        assert_eq!(archetype, Archetype::Explorer);
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(format!("{}", Archetype::Connector), "Connector");
    }
}
