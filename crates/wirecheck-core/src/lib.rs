//! # Wirecheck Core
//!
//! Core types for the Wirecheck HTTP contract-testing harness.
//!
//! This crate provides:
//! - Immutable request descriptors and response envelopes
//! - Facet extraction (status, headers, body) from a response
//! - Check helpers that compare a facet against an expectation and report
//!   expected vs. actual on failure
//! - The scenario state machine driven by the runner in `wirecheck-http`
//!
//! ## Example
//!
//! ```rust,ignore
//! use wirecheck_core::{check, Method, RequestDescriptor};
//!
//! let request = RequestDescriptor::builder(Method::Post, "http://localhost:8000/todos")
//!     .json(serde_json::json!({ "title": "Walk the dog" }))
//!     .build();
//!
//! // envelope comes back from wirecheck-http's Client
//! check::expect_status(&envelope, 201)?;
//! ```

pub mod check;
pub mod error;
pub mod request;
pub mod response;
pub mod scenario;

// Re-exports for convenience
pub use error::CheckError;
pub use request::{Method, RequestBuilder, RequestDescriptor};
pub use response::{Facet, FacetValue, ResponseBody, ResponseEnvelope};
pub use scenario::ScenarioState;
