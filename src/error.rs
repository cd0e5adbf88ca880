//! Errors raised at the input boundary
//!
//! The engine itself never fails; these only come from parsing and
//! validating what a caller hands it.

use thiserror::Error;

use crate::models::InputField;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown input field '{0}'")]
    UnknownField(String),

    #[error("expected FIELD=VALUE, got '{0}'")]
    MalformedAssignment(String),

    #[error("'{value}' is not a number (field {field})")]
    InvalidNumber { field: InputField, value: String },

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: InputField,
        expected: &'static str,
        value: f64,
    },

    #[error("unknown strategy '{0}' (expected markup, margin or price)")]
    UnknownStrategy(String),
}
