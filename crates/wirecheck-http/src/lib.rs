//! # Wirecheck HTTP
//!
//! The transport half of the Wirecheck harness.
//!
//! This crate provides:
//! - A reqwest-based [`Client`] adapter: one network call per send, any HTTP
//!   status resolves to a [`wirecheck_core::ResponseEnvelope`], only
//!   transport failures are errors
//! - [`HarnessConfig`] with an environment override for the target URL
//! - A sequential [`Scenario`] runner where a later step can use a value
//!   captured from an earlier response (a created resource's `location`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use wirecheck_core::{check, Method, RequestDescriptor};
//! use wirecheck_http::{Client, HarnessConfig, RequestStep, CheckStep, Scenario};
//!
//! let config = HarnessConfig::from_env();
//! let client = Client::from_config(&config)?;
//!
//! let report = Scenario::new("create todo")
//!     .step(
//!         RequestStep::new("post todo", move |_cx| {
//!             Ok(RequestDescriptor::builder(Method::Post, &url)
//!                 .json(serde_json::json!({ "title": "Walk the dog" }))
//!                 .build())
//!         })
//!         .capture_location(),
//!     )
//!     .step(CheckStep::new("created", |envelope| {
//!         check::expect_status(envelope, 201)
//!     }))
//!     .run(&client)
//!     .await;
//!
//! assert!(report.is_passed(), "{report}");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod runner;

// Re-exports for convenience
pub use client::Client;
pub use config::HarnessConfig;
pub use error::{HttpError, StepError};
pub use runner::{
    CheckStep, RequestStep, Scenario, ScenarioContext, ScenarioReport, Step, StepFailure,
};
