//! Input schemas for operations.
//!
//! A `Schema` is a flat list of top-level `Field`s. Array fields carry the
//! properties of their object items, which is as deep as the Holded payloads
//! go. The same declaration drives argument validation and the JSON Schema
//! advertised to MCP clients.

use serde_json::{Map, Value, json};

/// The kind of value a field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    /// Free-form JSON object.
    Object,
    /// Array of objects whose properties are described by the inner fields.
    Array(Vec<Field>),
}

impl FieldKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array(_) => "array",
        }
    }
}

/// One declared input field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    /// Closed set of accepted values for string fields.
    pub allowed: Option<&'static [&'static str]>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name,
            kind,
            description: description.into(),
            required: false,
            default: None,
            allowed: None,
        }
    }

    pub fn string(name: &'static str, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub fn number(name: &'static str, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    pub fn object(name: &'static str, description: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Object, description)
    }

    pub fn array_of(name: &'static str, description: impl Into<String>, items: Vec<Field>) -> Self {
        Self::new(name, FieldKind::Array(items), description)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Same field with the required flag set to `required`.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value injected when the caller omits the field.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Restrict a string field to a closed set of values.
    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    /// JSON Schema fragment describing this field.
    pub fn to_json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".into(), json!(self.kind.json_type()));
        if !self.description.is_empty() {
            property.insert("description".into(), json!(self.description));
        }
        if let Some(values) = self.allowed {
            property.insert("enum".into(), json!(values));
        }
        if let Some(default) = &self.default {
            property.insert("default".into(), default.clone());
        }
        if let FieldKind::Array(items) = &self.kind {
            property.insert("items".into(), Value::Object(object_schema(items)));
        }
        Value::Object(property)
    }
}

/// Declared input of one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Schema with no declared fields.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the required top-level fields, in declaration order.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// Render as a JSON Schema object (`type: object`).
    pub fn to_json_schema(&self) -> Map<String, Value> {
        object_schema(&self.fields)
    }
}

fn object_schema(fields: &[Field]) -> Map<String, Value> {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), f.to_json_schema()))
        .collect();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));

    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema
}
