//! Argument validation against an operation schema.
//!
//! Every violation is collected before returning so a caller can fix a
//! request in one round trip. Fields the schema does not declare pass
//! through untouched; the Holded API accepts more than we describe.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{Field, FieldKind, Schema};

/// Caller arguments keyed by field name.
pub type Arguments = Map<String, Value>;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Validate `arguments` against `schema` and apply defaults.
///
/// A `null` value counts as absent: it fails a required field, and it is
/// replaced by the default (or dropped) for an optional one.
pub fn validate(schema: &Schema, mut arguments: Arguments) -> Result<Arguments, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    for field in schema.fields() {
        let present = arguments.get(field.name).filter(|v| !v.is_null());
        match present {
            Some(value) => check_value(field, value, field.name, &mut violations),
            None if field.required => {
                violations.push(FieldViolation::new(field.name, "is required"));
            }
            None => match &field.default {
                Some(default) => {
                    arguments.insert(field.name.to_string(), default.clone());
                }
                None => {
                    arguments.remove(field.name);
                }
            },
        }
    }

    if violations.is_empty() {
        Ok(arguments)
    } else {
        Err(violations)
    }
}

fn check_value(field: &Field, value: &Value, path: &str, violations: &mut Vec<FieldViolation>) {
    let matches = match &field.kind {
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Object => value.is_object(),
        FieldKind::Array(_) => value.is_array(),
    };
    if !matches {
        violations.push(FieldViolation::new(
            path,
            format!("expected {}, got {}", field.kind.json_type(), json_type_name(value)),
        ));
        return;
    }

    if let (Some(allowed), Some(s)) = (field.allowed, value.as_str()) {
        if !allowed.contains(&s) {
            violations.push(FieldViolation::new(
                path,
                format!("must be one of: {}", allowed.join(", ")),
            ));
        }
    }

    if let (FieldKind::Array(item_fields), Some(items)) = (&field.kind, value.as_array()) {
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{index}]");
            let Some(object) = item.as_object() else {
                violations.push(FieldViolation::new(
                    item_path,
                    format!("expected object, got {}", json_type_name(item)),
                ));
                continue;
            };
            for item_field in item_fields {
                let nested_path = format!("{item_path}.{}", item_field.name);
                match object.get(item_field.name).filter(|v| !v.is_null()) {
                    Some(nested) => check_value(item_field, nested, &nested_path, violations),
                    None if item_field.required => {
                        violations.push(FieldViolation::new(nested_path, "is required"));
                    }
                    None => {}
                }
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    fn invoice_schema() -> Schema {
        Schema::new(vec![
            Field::string("contactId", "Contact ID").required(),
            Field::array_of(
                "items",
                "Invoice items",
                vec![Field::string("name", ""), Field::number("units", "")],
            )
            .required(),
            Field::string("notes", "Invoice notes"),
        ])
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let violations = validate(&invoice_schema(), Arguments::new()).unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["contactId", "items"]);
    }

    #[test]
    fn test_type_mismatch_reported_per_field() {
        let schema = Schema::new(vec![
            Field::number("page", "Page").with_default(json!(1)),
            Field::string("contactId", "Contact ID").required(),
        ]);
        let violations =
            validate(&schema, args(json!({"page": "two", "contactId": 7}))).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "page");
        assert_eq!(violations[0].reason, "expected number, got string");
        assert_eq!(violations[1].field, "contactId");
    }

    #[test]
    fn test_default_applied_when_absent() {
        let schema = Schema::new(vec![Field::number("page", "Page").with_default(json!(1))]);
        let validated = validate(&schema, Arguments::new()).unwrap();
        assert_eq!(validated.get("page"), Some(&json!(1)));
    }

    #[test]
    fn test_null_optional_is_dropped() {
        let validated =
            validate(&invoice_schema(), args(json!({"contactId": "c1", "items": [], "notes": null})))
                .unwrap();
        assert!(!validated.contains_key("notes"));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let validated = validate(
            &invoice_schema(),
            args(json!({"contactId": "c1", "items": [], "currency": "eur"})),
        )
        .unwrap();
        assert_eq!(validated.get("currency"), Some(&json!("eur")));
    }

    #[test]
    fn test_array_items_checked() {
        let violations = validate(
            &invoice_schema(),
            args(json!({"contactId": "c1", "items": [{"name": "x", "units": "3"}, 5]})),
        )
        .unwrap_err();
        let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["items[0].units", "items[1]"]);
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        const KINDS: &[&str] = &["invoice", "estimate"];
        let schema = Schema::new(vec![Field::string("docType", "Type").one_of(KINDS).required()]);
        let violations = validate(&schema, args(json!({"docType": "receipt"}))).unwrap_err();
        assert_eq!(violations[0].field, "docType");
        assert_eq!(violations[0].reason, "must be one of: invoice, estimate");
    }
}
