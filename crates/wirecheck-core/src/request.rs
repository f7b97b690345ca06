//! Request descriptors
//!
//! A [`RequestDescriptor`] captures everything needed to issue one HTTP
//! request: method, absolute URL, headers, and an optional JSON body. It is
//! built through a consuming [`RequestBuilder`] and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// HTTP methods supported by the harness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    /// Wire form of the method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully-described HTTP request
///
/// Header names are stored lower-cased so lookups stay case-insensitive end
/// to end. There are no mutators; rebuild a descriptor for a new request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    /// Start building a request for the given method and absolute URL
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Consuming builder for [`RequestDescriptor`]
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl RequestBuilder {
    /// Add a header; the name is lower-cased
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}
