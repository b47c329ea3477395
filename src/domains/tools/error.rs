//! Dispatch error types.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{Level, error, info, warn};

use super::validator::FieldViolation;
use crate::domains::holded::ClientError;

/// JSON-RPC code used for upstream API failures (implementation-defined range).
pub const REMOTE_ERROR_CODE: i32 = -32000;

/// Outward classification of a failed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    RemoteError,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::NotFound => "not_found",
            Self::RemoteError => "remote_error",
            Self::InternalError => "internal_error",
        }
    }
}

/// Errors that can end a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No operation is registered under the requested name.
    #[error("Unknown operation: {0}")]
    NotFound(String),

    /// Arguments violate the operation schema.
    #[error("Invalid arguments: {}", summarize(.0))]
    ValidationFailed(Vec<FieldViolation>),

    /// The Holded API answered with a non-2xx status.
    #[error("Holded API error (HTTP {status})")]
    Remote { status: u16, body: Value },

    /// Anything else, including transport failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DispatchError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed(vec![FieldViolation::new(field, reason)])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::Remote { .. } => ErrorKind::RemoteError,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Message safe to show to callers. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal error while processing the request".to_string(),
            other => other.to_string(),
        }
    }

    /// JSON-RPC error code for this failure.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::ValidationFailed(_) => -32602,
            Self::NotFound(_) => -32601,
            Self::Remote { .. } => REMOTE_ERROR_CODE,
            Self::Internal(_) => -32603,
        }
    }

    /// Level a façade logs this failure at: internal faults are errors,
    /// upstream rejections are warnings, caller mistakes are info.
    pub fn log_level(&self) -> Level {
        match self {
            Self::Internal(_) => Level::ERROR,
            Self::Remote { .. } => Level::WARN,
            _ => Level::INFO,
        }
    }

    /// Log this failure at its level, tagged with the façade that saw it.
    pub fn log(&self, facade: &str) {
        let level = self.log_level();
        if level == Level::ERROR {
            error!(facade = %facade, "Operation failed internally: {}", self);
        } else if level == Level::WARN {
            warn!(facade = %facade, "Operation failed upstream: {}", self);
        } else {
            info!(facade = %facade, "Operation rejected: {}", self);
        }
    }

    /// Structured detail attached to protocol errors.
    pub fn details(&self) -> Value {
        match self {
            Self::ValidationFailed(violations) => json!({
                "kind": self.kind(),
                "errors": violations,
            }),
            Self::Remote { status, body } => json!({
                "kind": self.kind(),
                "status": status,
                "body": body,
            }),
            _ => json!({ "kind": self.kind() }),
        }
    }
}

impl From<ClientError> for DispatchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Remote { status, body } => Self::Remote { status, body },
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = DispatchError::ValidationFailed(vec![
            FieldViolation::new("contactId", "is required"),
            FieldViolation::new("items", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid arguments: contactId is required; items is required"
        );
        assert_eq!(err.details()["errors"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_remote_client_error_preserved() {
        let err: DispatchError = ClientError::remote(404, r#"{"info":"not found"}"#).into();
        assert_eq!(err.kind(), ErrorKind::RemoteError);
        assert_eq!(err.details()["status"], 404);
        assert_eq!(err.details()["body"]["info"], "not found");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = DispatchError::internal("connection refused to 10.0.0.4");
        assert!(!err.public_message().contains("10.0.0.4"));
        assert_eq!(err.rpc_code(), -32603);
    }

    #[test]
    fn test_log_level_by_kind() {
        assert_eq!(DispatchError::internal("socket closed").log_level(), Level::ERROR);
        let remote = DispatchError::Remote {
            status: 503,
            body: Value::Null,
        };
        assert_eq!(remote.log_level(), Level::WARN);
        assert_eq!(DispatchError::not_found("nope").log_level(), Level::INFO);
        assert_eq!(DispatchError::invalid_field("page", "expected number").log_level(), Level::INFO);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ErrorKind::ValidationFailed).unwrap(),
            "validation_failed"
        );
        assert_eq!(ErrorKind::RemoteError.as_str(), "remote_error");
    }
}
