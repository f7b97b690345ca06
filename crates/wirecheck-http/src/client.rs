//! Reqwest-based HTTP client adapter

use crate::config::HarnessConfig;
use crate::error::HttpError;
use std::collections::HashMap;
use wirecheck_core::{Method, RequestDescriptor, ResponseBody, ResponseEnvelope};

/// HTTP client adapter for the harness
///
/// Performs exactly one network call per [`Client::send`]. Any HTTP response
/// resolves to an envelope, 4xx/5xx included; only transport-level failure
/// (connection refused, DNS, timeout) is an error.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
}

impl Client {
    /// Build a client from a harness configuration
    pub fn from_config(config: &HarnessConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(HttpError::ClientBuild)?;

        Ok(Self {
            client,
            default_headers: config.default_headers.clone(),
        })
    }

    /// Use a pre-built reqwest client with custom settings
    pub fn with_client(client: reqwest::Client, config: &HarnessConfig) -> Self {
        Self {
            client,
            default_headers: config.default_headers.clone(),
        }
    }

    /// Issue the described request and await its response
    ///
    /// Header names in the returned envelope are lower-cased. JSON bodies on
    /// the descriptor are sent via reqwest's `json`, which also sets
    /// `content-type: application/json`.
    pub async fn send(&self, request: &RequestDescriptor) -> Result<ResponseEnvelope, HttpError> {
        tracing::debug!(method = %request.method(), url = request.url(), "sending request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), request.url());

        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(HttpError::Transport)?;

        let status = response.status().as_u16();
        let headers = extract_headers(response.headers());
        let bytes = response.bytes().await.map_err(HttpError::Transport)?;
        let body = ResponseBody::from_bytes(&bytes);

        tracing::debug!(status, url = request.url(), "received response");

        Ok(ResponseEnvelope::new(status, headers, body))
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

// Header values with opaque (non-UTF-8) bytes are skipped.
fn extract_headers(header_map: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    header_map
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
