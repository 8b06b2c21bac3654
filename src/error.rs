//! Error types for condition construction and deserialization

use thiserror::Error;

/// Raised when a condition cannot be built from the supplied arguments or record.
///
/// Evaluation never produces this error; only construction and
/// deserialization do.
#[derive(Error, Debug)]
pub enum ConditionCreationError {
    #[error("Invalid argument type '{type_name}' for collection condition.")]
    InvalidArgumentType { type_name: String },

    #[error("Condition '{kind}' does not accept a value.")]
    UnexpectedValue { kind: &'static str },

    #[error("Condition '{kind}' requires a value.")]
    MissingValue { kind: &'static str },

    #[error("Condition record must be an object, got '{type_name}'.")]
    NotARecord { type_name: String },

    #[error("Value of type '{type_name}' in a collection condition has no JSON form.")]
    UnsupportedElement { type_name: String },

    #[error("Condition record has no 'condition' name.")]
    MissingCondition,

    #[error("Unknown collection condition: {0}")]
    UnknownCondition(String),

    #[error("Unknown field '{field}' for condition '{kind}'.")]
    UnknownField { kind: &'static str, field: String },

    #[error("Expected condition '{expected}', got '{found}'.")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for condition construction
pub type Result<T> = std::result::Result<T, ConditionCreationError>;
