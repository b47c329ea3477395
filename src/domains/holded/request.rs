//! Routed request value handed to the client.

use reqwest::Method;
use serde_json::Value;

/// A fully routed call against the Holded API.
///
/// `segments` are the path below the API base (for example
/// `["invoicing", "v1", "contacts", "c1"]`); each one is percent-encoded on
/// its own when the URL is built, so ids never split into extra segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request with no query and no body.
    pub fn new(method: Method, segments: Vec<String>) -> Self {
        Self {
            method,
            segments,
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path below the API base, joined with `/`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Encoded query string, or `None` when there are no parameters.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        serde_urlencoded::to_string(&self.query).ok()
    }

    /// Path plus query string, as it appears on the wire after the base URL.
    pub fn target(&self) -> String {
        match self.query_string() {
            Some(query) => format!("{}?{}", self.path(), query),
            None => self.path(),
        }
    }
}
