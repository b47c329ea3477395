//! Client-specific error types.

use thiserror::Error;

/// Errors that can occur while calling the Holded API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-2xx status.
    #[error("Holded API returned HTTP {status}: {body}")]
    Remote {
        status: u16,
        body: serde_json::Value,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried a body that is not JSON.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential contains bytes that cannot travel in a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Create a remote error from a status code and raw response text.
    ///
    /// The body is kept as JSON when it parses, otherwise as a string.
    pub fn remote(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string()));
        Self::Remote { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_keeps_json_body() {
        let err = ClientError::remote(422, r#"{"info":"missing name"}"#);
        match err {
            ClientError::Remote { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, json!({"info": "missing name"}));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_remote_falls_back_to_text() {
        let err = ClientError::remote(502, "Bad Gateway");
        assert!(matches!(
            err,
            ClientError::Remote { status: 502, ref body } if body == "Bad Gateway"
        ));
    }
}
