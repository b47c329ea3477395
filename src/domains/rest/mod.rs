//! REST API façade.
//!
//! A hand-specialized view over a few operations, for clients that speak
//! plain HTTP instead of MCP. Every handler ends in `Dispatcher::dispatch`,
//! so REST and MCP callers get the same validation and routing.
//!
//! | Route                     | Operation          |
//! |---------------------------|--------------------|
//! | `/api/appointments`       | bookings (CRUD)    |
//! | `/api/contacts`           | contacts           |
//! | `/api/services`           | services           |
//! | `/api/events`             | booking listing    |

mod appointments;
mod contacts;
mod error;
mod events;
mod services;
mod validation;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

pub use error::ApiError;

use crate::domains::tools::validator::validate;
use crate::domains::tools::{Arguments, DispatchError, Dispatcher, FieldViolation};

/// State shared by the REST handlers.
#[derive(Clone)]
pub struct RestState {
    dispatcher: Arc<Dispatcher>,
}

impl RestState {
    /// Run one operation.
    async fn call(&self, operation: &str, arguments: Arguments) -> Result<Value, ApiError> {
        Ok(self.dispatcher.dispatch(operation, arguments).await?)
    }

    /// Merge a route's own body checks with the operation schema, so one
    /// 400 lists every violation. A field the route already rejected is not
    /// reported twice.
    fn check(
        &self,
        operation: &str,
        arguments: &Arguments,
        route_checks: Result<(), Vec<FieldViolation>>,
    ) -> Result<(), ApiError> {
        let mut violations = route_checks.err().unwrap_or_default();
        let schema_violations = self
            .dispatcher
            .registry()
            .lookup(operation)
            .and_then(|op| validate(&op.schema, arguments.clone()).err())
            .unwrap_or_default();

        for violation in schema_violations {
            if !violations.iter().any(|seen| seen.field == violation.field) {
                violations.push(violation);
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::invalid(violations))
        }
    }

    /// Run a get-by-id operation; a `null` payload means the resource is gone.
    async fn find(
        &self,
        operation: &str,
        id_field: &str,
        id: String,
        what: &'static str,
    ) -> Result<Value, ApiError> {
        match self.call(operation, with_id(Arguments::new(), id_field, id)).await? {
            Value::Null => Err(ApiError::Missing(what)),
            found => Ok(found),
        }
    }
}

/// `?page=N` on listing routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
}

impl ListQuery {
    fn into_arguments(self) -> Arguments {
        let mut arguments = Arguments::new();
        if let Some(page) = self.page {
            arguments.insert("page".into(), json!(page));
        }
        arguments
    }
}

fn with_id(mut arguments: Arguments, field: &str, id: String) -> Arguments {
    arguments.insert(field.to_string(), Value::String(id));
    arguments
}

/// A request body must be a JSON object.
fn object_body(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(DispatchError::invalid_field("body", "expected a JSON object").into()),
    }
}

/// Build the REST router (state already applied).
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    let state = RestState { dispatcher };

    Router::new()
        .route(
            "/api/appointments",
            get(appointments::list).post(appointments::create),
        )
        .route(
            "/api/appointments/{id}",
            get(appointments::get_one)
                .put(appointments::update)
                .delete(appointments::delete),
        )
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route("/api/contacts/{id}", get(contacts::get_one))
        .route("/api/services", get(services::list))
        .route("/api/services/{id}", get(services::get_one))
        .route("/api/events", get(events::list))
        .with_state(state)
}

/// Operations the REST routes dispatch to.
#[cfg(test)]
const REST_OPERATIONS: &[&str] = &[
    appointments::LIST,
    appointments::GET,
    appointments::CREATE,
    appointments::UPDATE,
    appointments::DELETE,
    contacts::LIST,
    contacts::GET,
    contacts::CREATE,
    services::LIST,
    services::GET,
    events::LIST,
];

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{Router, body::Body};
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domains::tools::testing::FakeApi;
    use crate::domains::tools::{Dispatcher, OperationRegistry};

    pub fn app(api: FakeApi) -> (Router, Arc<FakeApi>) {
        let api = Arc::new(api);
        let registry = Arc::new(OperationRegistry::builtin().unwrap());
        let dispatcher = Arc::new(Dispatcher::new(registry, api.clone()));
        (super::router(dispatcher), api)
    }

    /// Send one request; returns status and parsed body (`Null` when empty).
    pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Send a raw JSON-typed body; returns status, content type and parsed body.
    pub async fn send_raw(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }
}
