//! Response envelopes and facet extraction
//!
//! A [`ResponseEnvelope`] is produced exactly once per request and read-only
//! afterwards. Header names are lower-cased at construction so that
//! `headers["location"]` and `headers["Location"]` are the same lookup.

use std::collections::HashMap;

/// Body of a response
///
/// Payloads that parse as JSON are kept parsed; anything else is kept as raw
/// bytes. An absent or zero-length payload is `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

impl ResponseBody {
    /// Classify a payload, preferring JSON
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(bytes.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// The part of a response a check targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Status,
    Header,
    Body,
}

/// An extracted facet value
#[derive(Debug, Clone, PartialEq)]
pub enum FacetValue {
    Status(u16),
    Headers(HashMap<String, String>),
    Body(ResponseBody),
}

/// One HTTP response, as observed by the harness
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: u16,
    headers: HashMap<String, String>,
    body: ResponseBody,
}

impl ResponseEnvelope {
    /// Assemble an envelope, lower-casing all header names
    pub fn new(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: ResponseBody,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Extract a named facet
    ///
    /// Extraction never compares anything; checks live in [`crate::check`]
    /// so callers can compose extraction and assertion independently.
    pub fn facet(&self, facet: Facet) -> FacetValue {
        match facet {
            Facet::Status => FacetValue::Status(self.status),
            Facet::Header => FacetValue::Headers(self.headers.clone()),
            Facet::Body => FacetValue::Body(self.body.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_header(name: &str, value: &str) -> ResponseEnvelope {
        ResponseEnvelope::new(
            200,
            vec![(name.to_string(), value.to_string())],
            ResponseBody::Empty,
        )
    }

    #[test]
    fn test_header_names_lowercased_at_construction() {
        let envelope = envelope_with_header("Location", "http://localhost:8000/todos/1");
        assert_eq!(
            envelope.headers().get("location").map(String::as_str),
            Some("http://localhost:8000/todos/1")
        );
        assert!(envelope.headers().get("Location").is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let envelope = envelope_with_header("location", "http://localhost:8000/todos/7");
        assert_eq!(envelope.header("Location"), envelope.header("location"));
    }

    #[test]
    fn test_body_from_bytes_prefers_json() {
        let body = ResponseBody::from_bytes(br#"{"title":"Walk the dog"}"#);
        assert_eq!(
            body.as_json(),
            Some(&serde_json::json!({ "title": "Walk the dog" }))
        );
    }

    #[test]
    fn test_body_from_bytes_falls_back_to_raw() {
        let body = ResponseBody::from_bytes(b"Not Found");
        assert_eq!(body, ResponseBody::Raw(b"Not Found".to_vec()));
    }

    #[test]
    fn test_body_from_bytes_empty() {
        assert!(ResponseBody::from_bytes(b"").is_empty());
    }

    #[test]
    fn test_facet_extraction() {
        let envelope = ResponseEnvelope::new(
            204,
            vec![("Allow".to_string(), "GET".to_string())],
            ResponseBody::Empty,
        );

        assert_eq!(envelope.facet(Facet::Status), FacetValue::Status(204));
        match envelope.facet(Facet::Header) {
            FacetValue::Headers(headers) => {
                assert_eq!(headers.get("allow").map(String::as_str), Some("GET"))
            }
            other => panic!("expected headers facet, got {:?}", other),
        }
        assert_eq!(
            envelope.facet(Facet::Body),
            FacetValue::Body(ResponseBody::Empty)
        );
    }
}
