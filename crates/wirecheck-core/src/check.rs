//! Check helpers
//!
//! Small predicates over a [`ResponseEnvelope`], one per kind of
//! expectation. Each returns `Ok(())` or a [`CheckError`] carrying expected
//! vs. actual. Extraction and comparison stay separate: these helpers never
//! issue requests and never touch anything but the envelope they are given.

use crate::error::CheckError;
use crate::response::{ResponseBody, ResponseEnvelope};
use regex::Regex;

/// The response status must equal `expected`
pub fn expect_status(envelope: &ResponseEnvelope, expected: u16) -> Result<(), CheckError> {
    let actual = envelope.status();
    if actual != expected {
        return Err(CheckError::StatusMismatch { expected, actual });
    }
    Ok(())
}

/// The response headers must contain every named key
pub fn expect_header_keys(envelope: &ResponseEnvelope, keys: &[&str]) -> Result<(), CheckError> {
    for key in keys {
        if envelope.header(key).is_none() {
            return Err(CheckError::MissingHeader {
                name: key.to_ascii_lowercase(),
            });
        }
    }
    Ok(())
}

/// The named header must be present and equal `expected`
pub fn expect_header(
    envelope: &ResponseEnvelope,
    name: &str,
    expected: &str,
) -> Result<(), CheckError> {
    let actual = envelope.header(name).ok_or_else(|| CheckError::MissingHeader {
        name: name.to_ascii_lowercase(),
    })?;

    if actual != expected {
        return Err(CheckError::HeaderMismatch {
            name: name.to_ascii_lowercase(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// The named header must be present and match the regex `pattern`
pub fn expect_header_matches(
    envelope: &ResponseEnvelope,
    name: &str,
    pattern: &str,
) -> Result<(), CheckError> {
    let regex = Regex::new(pattern).map_err(|e| CheckError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let actual = envelope.header(name).ok_or_else(|| CheckError::MissingHeader {
        name: name.to_ascii_lowercase(),
    })?;

    if !regex.is_match(actual) {
        return Err(CheckError::HeaderPatternMismatch {
            name: name.to_ascii_lowercase(),
            pattern: pattern.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// The JSON body field at `pointer` (RFC 6901) must equal `expected`
pub fn expect_body_field(
    envelope: &ResponseEnvelope,
    pointer: &str,
    expected: &serde_json::Value,
) -> Result<(), CheckError> {
    let json = envelope.body().as_json().ok_or(CheckError::BodyNotJson)?;

    let actual = json
        .pointer(pointer)
        .ok_or_else(|| CheckError::MissingBodyField {
            pointer: pointer.to_string(),
        })?;

    if actual != expected {
        return Err(CheckError::BodyFieldMismatch {
            pointer: pointer.to_string(),
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

/// The response body must be empty
pub fn expect_empty_body(envelope: &ResponseEnvelope) -> Result<(), CheckError> {
    match envelope.body() {
        ResponseBody::Empty => Ok(()),
        ResponseBody::Json(value) => Err(CheckError::BodyNotEmpty {
            actual_bytes: value.to_string().len(),
        }),
        ResponseBody::Raw(bytes) => Err(CheckError::BodyNotEmpty {
            actual_bytes: bytes.len(),
        }),
    }
}
