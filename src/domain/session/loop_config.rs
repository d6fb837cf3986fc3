//! Loop configuration - the session-scoped stopping parameters.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Lowest acceptable stop threshold.
pub const MIN_THRESHOLD: f64 = 0.5;

/// Bounds for the maximum question count.
pub const MAX_QUESTIONS_RANGE: (u8, u8) = (2, 12);

/// Upper bound for the minimum question count.
pub const MIN_QUESTIONS_CEILING: u8 = 10;

/// Stop-policy parameters for one session.
///
/// May change mid-session: a change never invalidates answers already given,
/// it only affects the next stop check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoopConfig", into = "RawLoopConfig")]
pub struct LoopConfig {
    threshold: f64,
    min_questions: u8,
    max_questions: u8,
}

impl LoopConfig {
    /// Creates a config, validating each parameter independently.
    ///
    /// # Errors
    ///
    /// - `threshold` outside `[0.5, 1)`
    /// - `max_questions` outside `[2, 12]`
    /// - `min_questions` above 10 or above `max_questions`
    pub fn try_new(threshold: f64, min_questions: u8, max_questions: u8) -> Result<Self, ValidationError> {
        if !threshold.is_finite() || !(MIN_THRESHOLD..1.0).contains(&threshold) {
            return Err(ValidationError::out_of_range(
                "threshold",
                MIN_THRESHOLD,
                1.0,
                threshold,
            ));
        }
        let (max_lo, max_hi) = MAX_QUESTIONS_RANGE;
        if !(max_lo..=max_hi).contains(&max_questions) {
            return Err(ValidationError::out_of_range(
                "max_questions",
                max_lo as f64,
                max_hi as f64,
                max_questions as f64,
            ));
        }
        if min_questions > MIN_QUESTIONS_CEILING {
            return Err(ValidationError::out_of_range(
                "min_questions",
                0.0,
                MIN_QUESTIONS_CEILING as f64,
                min_questions as f64,
            ));
        }
        if min_questions > max_questions {
            return Err(ValidationError::invalid_format(
                "min_questions",
                format!("must not exceed max_questions ({max_questions}), got {min_questions}"),
            ));
        }
        Ok(Self {
            threshold,
            min_questions,
            max_questions,
        })
    }

    /// Returns the confidence threshold that ends a session early.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the minimum number of questions before any stop.
    pub fn min_questions(&self) -> u8 {
        self.min_questions
    }

    /// Returns the hard cap on questions asked.
    pub fn max_questions(&self) -> u8 {
        self.max_questions
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            min_questions: 1,
            max_questions: 8,
        }
    }
}

/// Wire representation used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLoopConfig {
    threshold: f64,
    min_questions: u8,
    max_questions: u8,
}

impl TryFrom<RawLoopConfig> for LoopConfig {
    type Error = ValidationError;

    fn try_from(raw: RawLoopConfig) -> Result<Self, Self::Error> {
        LoopConfig::try_new(raw.threshold, raw.min_questions, raw.max_questions)
    }
}

impl From<LoopConfig> for RawLoopConfig {
    fn from(config: LoopConfig) -> Self {
        RawLoopConfig {
            threshold: config.threshold,
            min_questions: config.min_questions,
            max_questions: config.max_questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = LoopConfig::default();
        assert!(LoopConfig::try_new(
            config.threshold(),
            config.min_questions(),
            config.max_questions()
        )
        .is_ok());
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(LoopConfig::try_new(0.5, 0, 2).is_ok());
        assert!(LoopConfig::try_new(0.999, 10, 12).is_ok());
    }

    #[test]
    fn rejects_threshold_outside_half_open_interval() {
        assert!(LoopConfig::try_new(0.49, 1, 8).is_err());
        assert!(LoopConfig::try_new(1.0, 1, 8).is_err());
        assert!(LoopConfig::try_new(f64::NAN, 1, 8).is_err());
    }

    #[test]
    fn rejects_max_questions_out_of_range() {
        assert!(LoopConfig::try_new(0.85, 1, 1).is_err());
        assert!(LoopConfig::try_new(0.85, 1, 13).is_err());
    }

    #[test]
    fn rejects_min_above_ceiling_or_above_max() {
        assert!(LoopConfig::try_new(0.85, 11, 12).is_err());
        assert!(LoopConfig::try_new(0.85, 5, 4).is_err());
    }

    #[test]
    fn deserialization_runs_validation() {
        let bad = r#"{"threshold": 1.5, "min_questions": 1, "max_questions": 8}"#;
        assert!(serde_json::from_str::<LoopConfig>(bad).is_err());

        let good = r#"{"threshold": 0.9, "min_questions": 2, "max_questions": 6}"#;
        let config: LoopConfig = serde_json::from_str(good).unwrap();
        assert_eq!(config.max_questions(), 6);
    }
}
