//! Harness configuration
//!
//! The target collection URL can be overridden with the `URL` environment
//! variable; everything else has code-level defaults.

use std::collections::HashMap;
use std::time::Duration;

/// Environment variable overriding the collection URL
pub const URL_ENV_VAR: &str = "URL";

/// Default Todos collection endpoint
pub const DEFAULT_COLLECTION_URL: &str = "http://localhost:8000/todos";

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Configuration for a [`crate::Client`] and the scenarios built on it
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Collection endpoint under test
    pub collection_url: String,
    /// Per-request timeout; expiry surfaces as a transport error
    pub timeout: Duration,
    /// Headers applied to every outgoing request
    pub default_headers: HashMap<String, String>,
}

impl HarnessConfig {
    /// Build a configuration, honoring the `URL` environment override
    pub fn from_env() -> Self {
        let collection_url =
            std::env::var(URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_COLLECTION_URL.to_string());

        Self {
            collection_url,
            ..Self::default()
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request; the name is lower-cased
    pub fn with_default_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("accept".to_string(), "application/json".to_string());

        Self {
            collection_url: DEFAULT_COLLECTION_URL.to_string(),
            timeout: default_timeout(),
            default_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.collection_url, "http://localhost:8000/todos");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.default_headers.get("accept").map(String::as_str),
            Some("application/json")
        );
    }

    // The only test in this crate touching the process environment.
    #[test]
    fn test_env_override() {
        std::env::set_var(URL_ENV_VAR, "http://todo-backend:9000/todos");
        let config = HarnessConfig::from_env();
        std::env::remove_var(URL_ENV_VAR);

        assert_eq!(config.collection_url, "http://todo-backend:9000/todos");
        assert_eq!(HarnessConfig::from_env().collection_url, DEFAULT_COLLECTION_URL);
    }

    #[test]
    fn test_builder_overrides() {
        let config = HarnessConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_default_header("X-Suite", "todos");

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(
            config.default_headers.get("x-suite").map(String::as_str),
            Some("todos")
        );
    }
}
