// Request payload validation for the mutating employee endpoints.
//
// A field is "missing" when the key is absent, `null`, or an empty string.
// Numeric fields must be a JSON integer or a string that parses as one.
use serde_json::Value;
use thiserror::Error;

use crate::database::models::NewEmployee;

pub const REQUIRED_FIELDS: [&str; 5] = ["name", "age", "country", "role", "years"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField(&'static str),

    #[error("Age and years must be numbers")]
    NonNumericField(&'static str),

    #[error("Invalid ID")]
    InvalidId,
}

impl ValidationError {
    /// Machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::NonNumericField(_) => "non_numeric_field",
            ValidationError::InvalidId => "invalid_id",
        }
    }
}

/// Checks a create/update body and returns the typed record.
///
/// Every required field is checked for presence before any numeric check
/// runs, so a body that is both incomplete and malformed reports the
/// missing field.
pub fn validate_employee(body: &Value) -> Result<NewEmployee, ValidationError> {
    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| is_missing(body.get(**f))) {
        return Err(ValidationError::MissingField(*field));
    }

    Ok(NewEmployee {
        name: text_field(body, "name")?,
        country: text_field(body, "country")?,
        role: text_field(body, "role")?,
        age: integer_field(body, "age")?,
        years: integer_field(body, "years")?,
    })
}

/// Id carried in an update body.
pub fn parse_id(value: Option<&Value>) -> Result<i64, ValidationError> {
    value.and_then(as_integer).ok_or(ValidationError::InvalidId)
}

/// Id carried in a path segment.
pub fn parse_path_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidId)
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn text_field(body: &Value, field: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn integer_field(body: &Value, field: &'static str) -> Result<i64, ValidationError> {
    body.get(field)
        .and_then(as_integer)
        .ok_or(ValidationError::NonNumericField(field))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}
