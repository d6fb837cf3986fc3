//! SessionPhase enum for tracking the classification lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a classification session.
///
/// Answer application only moves `Collecting -> Done`; once `Done`, no
/// further answers are accepted. Undo is the single road back: popping an
/// answer record reopens the session to `Collecting` so the posterior can
/// never sit stale behind a terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Collecting,
    Done,
}

impl SessionPhase {
    /// Returns true if the session accepts further answers.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, SessionPhase::Collecting)
    }

    /// Validates a transition from this phase to another.
    ///
    /// Valid transitions:
    /// - Collecting -> Done (stop condition met)
    /// - Done -> Collecting (undo)
    pub fn can_transition_to(&self, target: &SessionPhase) -> bool {
        use SessionPhase::*;
        matches!((self, target), (Collecting, Done) | (Done, Collecting))
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Collecting => "Collecting",
            SessionPhase::Done => "Done",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_collecting() {
        assert_eq!(SessionPhase::default(), SessionPhase::Collecting);
    }

    #[test]
    fn only_collecting_accepts_answers() {
        assert!(SessionPhase::Collecting.accepts_answers());
        assert!(!SessionPhase::Done.accepts_answers());
    }

    #[test]
    fn transitions_go_both_ways_but_never_self_loop() {
        assert!(SessionPhase::Collecting.can_transition_to(&SessionPhase::Done));
        assert!(SessionPhase::Done.can_transition_to(&SessionPhase::Collecting));
        assert!(!SessionPhase::Collecting.can_transition_to(&SessionPhase::Collecting));
        assert!(!SessionPhase::Done.can_transition_to(&SessionPhase::Done));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&SessionPhase::Collecting).unwrap(),
            "\"collecting\""
        );
        assert_eq!(serde_json::to_string(&SessionPhase::Done).unwrap(), "\"done\"");
    }
}
