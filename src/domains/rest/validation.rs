//! Request body checks for the REST routes.
//!
//! These run before dispatch and report every failing field at once, with
//! the field-level messages REST clients already rely on.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::domains::tools::FieldViolation;

/// Collects violations for one request body.
struct Checker<'a> {
    body: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> Checker<'a> {
    fn new(body: &'a Map<String, Value>) -> Self {
        Self {
            body,
            violations: Vec::new(),
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.violations.push(FieldViolation::new(field, message));
    }

    fn not_empty(&mut self, field: &str, message: &str) -> &mut Self {
        let ok = match self.body.get(field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !ok {
            self.fail(field, message);
        }
        self
    }

    fn iso8601(&mut self, field: &str, message: &str) -> &mut Self {
        let ok = matches!(self.body.get(field), Some(Value::String(s)) if is_iso8601(s));
        if !ok {
            self.fail(field, message);
        }
        self
    }

    fn optional_string(&mut self, field: &str, message: &str) -> &mut Self {
        if let Some(value) = self.body.get(field) {
            if !value.is_string() {
                self.fail(field, message);
            }
        }
        self
    }

    fn optional_email(&mut self, field: &str, message: &str) -> &mut Self {
        if let Some(value) = self.body.get(field) {
            if !value.as_str().is_some_and(is_email) {
                self.fail(field, message);
            }
        }
        self
    }

    fn finish(&mut self) -> Result<(), Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.violations))
        }
    }
}

/// Body of `POST /api/appointments` and `PUT /api/appointments/{id}`.
pub fn check_appointment(body: &Map<String, Value>) -> Result<(), Vec<FieldViolation>> {
    Checker::new(body)
        .not_empty("title", "Title is required")
        .iso8601("startDate", "Invalid start date")
        .iso8601("endDate", "Invalid end date")
        .optional_string("contactId", "Invalid contact ID")
        .optional_string("serviceId", "Invalid service ID")
        .optional_string("notes", "Notes must be a string")
        .finish()
}

/// Body of `POST /api/contacts`.
pub fn check_contact(body: &Map<String, Value>) -> Result<(), Vec<FieldViolation>> {
    Checker::new(body)
        .not_empty("name", "Name is required")
        .optional_email("email", "Invalid email")
        .optional_string("phone", "Invalid phone number")
        .optional_string("address", "Address must be a string")
        .finish()
}

/// Calendar date, local date-time, or date-time with offset.
fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !s.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2 && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn fields(result: Result<(), Vec<FieldViolation>>) -> Vec<String> {
        result.unwrap_err().into_iter().map(|v| v.field).collect()
    }

    #[test]
    fn test_valid_appointment() {
        let ok = check_appointment(&body(json!({
            "title": "Meeting",
            "startDate": "2023-01-01T10:00:00Z",
            "endDate": "2023-01-01T11:00:00+01:00",
            "notes": "bring slides"
        })));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_invalid_appointment_reports_all_fields() {
        let result = check_appointment(&body(json!({"title": "", "startDate": "invalid-date"})));
        assert_eq!(fields(result), vec!["title", "startDate", "endDate"]);
    }

    #[test]
    fn test_appointment_messages() {
        let violations = check_appointment(&body(json!({
            "title": "x",
            "startDate": "2024-05-01",
            "endDate": "2024-05-01T09:30",
            "contactId": 42
        })))
        .unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].reason, "Invalid contact ID");
    }

    #[test]
    fn test_contact_rules() {
        assert!(check_contact(&body(json!({"name": "Acme", "email": "ops@acme.io"}))).is_ok());
        let result = check_contact(&body(json!({"email": "not-an-email", "phone": 600})));
        assert_eq!(fields(result), vec!["name", "email", "phone"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.de"));
    }
}
