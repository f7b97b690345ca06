//! Error types for the transport and runner layers
//!
//! Transport failures and check failures are distinct variants end to end;
//! nothing here wraps an error into a string, so the original message (and
//! source chain) survives into the scenario report.

use thiserror::Error;
use wirecheck_core::CheckError;

/// Errors from the HTTP client adapter
///
/// An HTTP response with a 4xx/5xx status is not an error at this layer;
/// only failing to obtain a response is.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Errors that fail a scenario step
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("assertion failed: {0}")]
    Check(#[from] CheckError),

    #[error("no location captured by an earlier step")]
    MissingLocation,

    #[error("no response available; no request step has run yet")]
    NoResponse,
}

impl StepError {
    /// Whether this failure came from the transport, as opposed to a check
    pub fn is_transport(&self) -> bool {
        matches!(self, StepError::Transport(_))
    }
}
