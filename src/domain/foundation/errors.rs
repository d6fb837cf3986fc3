//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by engine operations.
///
/// The engine is pure math over validated inputs, so the taxonomy is narrow:
/// data-integrity mistakes by the caller are rejected loudly (a silently wrong
/// weight would corrupt the posterior undetectably), while expected numeric
/// edge cases are recovered locally and never reach this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Unknown question id '{id}'")]
    UnknownQuestion { id: String },

    #[error("Unrecognized answer level '{token}'")]
    UnknownAnswer { token: String },

    #[error("Question '{id}' has already been answered in this session")]
    DuplicateAnswer { id: String },

    #[error("Session is complete; no further answers are accepted")]
    SessionComplete,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
