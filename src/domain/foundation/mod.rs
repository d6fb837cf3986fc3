//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Persona Compass domain.

mod answer;
mod archetype;
mod errors;
mod ids;
mod timestamp;

pub use answer::AnswerLevel;
pub use archetype::{Archetype, ARCHETYPE_COUNT};
pub use errors::{EngineError, ValidationError};
pub use ids::{QuestionId, SessionId};
pub use timestamp::Timestamp;
