//! Prior builder - starting belief from contextual signals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{Archetype, ARCHETYPE_COUNT};
use crate::domain::probability::Belief;

/// Bonus added per matched trait tag.
///
/// Traits stack additively with no cap: a user whose traits all point at one
/// archetype gets a correspondingly stronger prior. The accumulation is
/// intentionally unbounded.
pub const TRAIT_BONUS: f64 = 0.35;

/// The categorical context a session is opened under.
///
/// Each area nudges the prior toward the 1-2 archetypes it is associated
/// with. Bonuses stay at or below 0.5 so a prior never dominates the
/// evidence collected from answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Work,
    Relationships,
    Growth,
    Wellbeing,
}

impl FocusArea {
    /// Returns the prior bonuses this focus area contributes.
    pub fn bonuses(&self) -> &'static [(Archetype, f64)] {
        match self {
            FocusArea::Work => &[(Archetype::Builder, 0.4), (Archetype::Analyst, 0.25)],
            FocusArea::Relationships => &[(Archetype::Connector, 0.4)],
            FocusArea::Growth => &[(Archetype::Explorer, 0.4), (Archetype::Analyst, 0.15)],
            FocusArea::Wellbeing => &[(Archetype::Anchor, 0.4), (Archetype::Connector, 0.2)],
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FocusArea::Work => "Work",
            FocusArea::Relationships => "Relationships",
            FocusArea::Growth => "Growth",
            FocusArea::Wellbeing => "Wellbeing",
        };
        write!(f, "{}", s)
    }
}

/// Injected trait-tag to archetype table.
///
/// Configuration supplied by the caller alongside the question bank, never
/// global state. Unknown tags simply contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitMap {
    map: HashMap<String, Archetype>,
}

impl TraitMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(tag, archetype)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Archetype)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    /// Looks up the archetype a trait tag maps to.
    pub fn archetype_for(&self, tag: &str) -> Option<Archetype> {
        self.map.get(tag).copied()
    }

    /// Returns the number of known trait tags.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no tags are mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Builds the session prior from a focus area and the user's trait tags.
///
/// Every archetype starts at weight 1 (uninformative). The focus area adds
/// its fixed bonuses, each trait tag found in the map adds [`TRAIT_BONUS`] to
/// its archetype, and the result is normalized. With no signals at all this
/// yields the uniform distribution.
pub fn build_prior(
    focus: Option<FocusArea>,
    traits: &[String],
    trait_map: &TraitMap,
) -> Belief {
    let mut weights = [1.0; ARCHETYPE_COUNT];

    if let Some(area) = focus {
        for (archetype, bonus) in area.bonuses() {
            weights[archetype.order_index()] += bonus;
        }
    }

    for tag in traits {
        if let Some(archetype) = trait_map.archetype_for(tag) {
            weights[archetype.order_index()] += TRAIT_BONUS;
        }
    }

    Belief::normalized(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trait_map() -> TraitMap {
        TraitMap::from_pairs([
            ("curious".to_string(), Archetype::Explorer),
            ("organized".to_string(), Archetype::Analyst),
            ("warm".to_string(), Archetype::Connector),
        ])
    }

    #[test]
    fn no_signals_yields_uniform() {
        let prior = build_prior(None, &[], &TraitMap::new());
        assert_eq!(prior, Belief::uniform());
    }

    #[test]
    fn focus_area_boosts_its_archetypes() {
        let prior = build_prior(Some(FocusArea::Work), &[], &TraitMap::new());
        let (top, _) = prior.top();
        assert_eq!(top, Archetype::Builder);
        assert!(prior.prob(Archetype::Analyst) > prior.prob(Archetype::Connector));
    }

    #[test]
    fn matched_traits_boost_their_archetype() {
        let traits = vec!["curious".to_string()];
        let prior = build_prior(None, &traits, &trait_map());
        assert_eq!(prior.top().0, Archetype::Explorer);
    }

    #[test]
    fn unknown_traits_contribute_nothing() {
        let traits = vec!["left_handed".to_string()];
        let prior = build_prior(None, &traits, &trait_map());
        assert_eq!(prior, Belief::uniform());
    }

    #[test]
    fn trait_bonuses_stack_without_cap() {
        // Three tags on the same archetype: weight 1 + 3*0.35 = 2.05 against
        // four at 1.0, so Explorer holds 2.05/6.05 of the mass.
        let map = TraitMap::from_pairs([
            ("a".to_string(), Archetype::Explorer),
            ("b".to_string(), Archetype::Explorer),
            ("c".to_string(), Archetype::Explorer),
        ]);
        let traits: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let prior = build_prior(None, &traits, &map);
        let expected = (1.0 + 3.0 * TRAIT_BONUS) / (4.0 + 1.0 + 3.0 * TRAIT_BONUS);
        assert!((prior.prob(Archetype::Explorer) - expected).abs() < 1e-6);
    }

    #[test]
    fn focus_and_traits_combine_additively() {
        let traits = vec!["organized".to_string()];
        let prior = build_prior(Some(FocusArea::Work), &traits, &trait_map());
        // Analyst: 1 + 0.25 + 0.35 = 1.6 beats Builder: 1 + 0.4 = 1.4.
        assert_eq!(prior.top().0, Archetype::Analyst);
    }

    #[test]
    fn all_bonuses_stay_at_or_below_half() {
        for area in [
            FocusArea::Work,
            FocusArea::Relationships,
            FocusArea::Growth,
            FocusArea::Wellbeing,
        ] {
            for (_, bonus) in area.bonuses() {
                assert!(*bonus <= 0.5);
            }
        }
    }

    #[test]
    fn focus_area_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FocusArea::Relationships).unwrap(),
            "\"relationships\""
        );
    }
}
