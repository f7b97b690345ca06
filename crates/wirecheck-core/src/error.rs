//! Check failures
//!
//! Every variant carries the expectation and what was actually observed, so
//! a failed scenario can report both without re-inspecting the response.

use thiserror::Error;

/// A check against an extracted facet did not hold
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckError {
    #[error("status mismatch: expected {expected}, got {actual}")]
    StatusMismatch { expected: u16, actual: u16 },

    #[error("missing header '{name}'")]
    MissingHeader { name: String },

    #[error("header '{name}' mismatch: expected '{expected}', got '{actual}'")]
    HeaderMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("header '{name}' value '{actual}' does not match pattern '{pattern}'")]
    HeaderPatternMismatch {
        name: String,
        pattern: String,
        actual: String,
    },

    #[error("invalid header pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("body is not JSON")]
    BodyNotJson,

    #[error("missing body field '{pointer}'")]
    MissingBodyField { pointer: String },

    #[error("body field '{pointer}' mismatch: expected {expected}, got {actual}")]
    BodyFieldMismatch {
        pointer: String,
        expected: serde_json::Value,
        actual: serde_json::Value,
    },

    #[error("expected empty body, got {actual_bytes} bytes")]
    BodyNotEmpty { actual_bytes: usize },
}
