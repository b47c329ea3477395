//! REST error responses.
//!
//! Every failure renders as `{"error": kind, "message": ...}` with the
//! extra keys of its kind: `errors` for validation, `status`/`body` for
//! upstream failures.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::domains::tools::{DispatchError, ErrorKind, FieldViolation};

/// Error returned by REST handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Dispatch failed.
    Dispatch(DispatchError),
    /// The upstream answered with no resource.
    Missing(&'static str),
}

impl ApiError {
    pub fn invalid(violations: Vec<FieldViolation>) -> Self {
        Self::Dispatch(DispatchError::ValidationFailed(violations))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Missing(_) => StatusCode::NOT_FOUND,
            Self::Dispatch(err) => match err {
                DispatchError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
                DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
                DispatchError::Remote { status, .. } => StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                DispatchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Missing(what) => json!({
                "error": ErrorKind::NotFound.as_str(),
                "message": format!("{what} not found"),
            }),
            Self::Dispatch(err) => {
                let mut body = json!({
                    "error": err.kind().as_str(),
                    "message": err.public_message(),
                });
                match err {
                    DispatchError::ValidationFailed(violations) => {
                        body["errors"] = json!(violations);
                    }
                    DispatchError::Remote { status, body: upstream } => {
                        body["status"] = json!(status);
                        body["body"] = upstream.clone();
                    }
                    _ => {}
                }
                body
            }
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

/// A body axum could not read as JSON.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        DispatchError::invalid_field("body", rejection.body_text()).into()
    }
}

/// A query string that does not fit `ListQuery`.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        DispatchError::invalid_field("query", rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Dispatch(err) = &self {
            err.log("rest");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
