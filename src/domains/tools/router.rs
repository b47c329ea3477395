//! Resource Router - turns validated arguments into an `ApiRequest`.
//!
//! Path fields (the instance id and, for generic document operations, the
//! document type) and query fields are taken out of the argument set before
//! the body is built, so ids travel in the path and never in the payload.

use serde_json::{Map, Value};

use super::error::DispatchError;
use super::resource::{DocumentType, Family, ResourceDescriptor, Verb};
use super::validator::Arguments;
use crate::domains::holded::ApiRequest;

/// Which family an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Family fixed by the operation itself.
    Family(Family),
    /// Document family whose subtype is read from the named argument.
    DocumentFromArgument(&'static str),
}

/// How the request body is built from the remaining arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// No body.
    Empty,
    /// The remaining arguments, as an object.
    Arguments,
    /// The value of a single argument.
    Field(&'static str),
    /// The remaining arguments nested under one key.
    Wrapped(&'static str),
}

/// Routing declaration attached to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub target: Target,
    pub verb: Verb,
    pub id_field: Option<&'static str>,
    pub query_fields: &'static [&'static str],
    pub body: BodyShape,
}

impl RouteSpec {
    pub fn new(target: Target, verb: Verb) -> Self {
        Self {
            target,
            verb,
            id_field: None,
            query_fields: &[],
            body: BodyShape::Empty,
        }
    }

    pub fn with_id(mut self, field: &'static str) -> Self {
        self.id_field = Some(field);
        self
    }

    pub fn with_query(mut self, fields: &'static [&'static str]) -> Self {
        self.query_fields = fields;
        self
    }

    pub fn with_body(mut self, body: BodyShape) -> Self {
        self.body = body;
        self
    }
}

/// Route one call.
///
/// Missing or mistyped path fields surface as validation failures so that
/// a schema that forgot to mark them required still fails cleanly.
pub fn route(spec: &RouteSpec, mut arguments: Arguments) -> Result<ApiRequest, DispatchError> {
    let family = match spec.target {
        Target::Family(family) => family,
        Target::DocumentFromArgument(field) => {
            let raw = take_string(&mut arguments, field)?;
            let doc_type: DocumentType = raw
                .parse()
                .map_err(|reason: String| DispatchError::invalid_field(field, reason))?;
            Family::Document(doc_type)
        }
    };
    let descriptor = ResourceDescriptor::new(family, spec.verb);

    let id = match spec.id_field {
        Some(field) => Some(take_string(&mut arguments, field)?),
        None => None,
    };
    let segments = descriptor.segments(id.as_deref()).ok_or_else(|| {
        DispatchError::internal(format!("{:?} route declared without an id field", spec.verb))
    })?;

    let mut request = ApiRequest::new(descriptor.method(), segments);
    for field in spec.query_fields {
        if let Some(value) = arguments.remove(*field) {
            if let Some(value) = query_value(&value) {
                request = request.with_query(*field, value);
            }
        }
    }

    let body = match spec.body {
        BodyShape::Empty => None,
        BodyShape::Arguments => Some(Value::Object(arguments)),
        BodyShape::Field(field) => Some(arguments.remove(field).unwrap_or(Value::Null)),
        BodyShape::Wrapped(key) => {
            let mut wrapper = Map::new();
            wrapper.insert(key.to_string(), Value::Object(arguments));
            Some(Value::Object(wrapper))
        }
    };
    if let Some(body) = body {
        request = request.with_body(body);
    }
    Ok(request)
}

fn take_string(arguments: &mut Arguments, field: &str) -> Result<String, DispatchError> {
    match arguments.remove(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) => Err(DispatchError::invalid_field(field, "must not be empty")),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(DispatchError::invalid_field(field, "expected string")),
        None => Err(DispatchError::invalid_field(field, "is required")),
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
