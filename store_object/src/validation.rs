//! Validation module
//!
//! Checks request input against a [`Schema`] before it reaches the query
//! builders. Column names that get past these checks are trusted verbatim.

use crate::errors::StoreError;
use crate::schema::{FieldRule, Schema};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Validation errors for request input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Key is not part of the schema, or is forbidden in this position
    NotAllowed(String),
    ExpectedString(String),
    EmptyString(String),
    ExpectedPositiveNumber(String),
    ExpectedObject(String),
    ExpectedNumber(String),
    /// Number outside the inclusive range
    OutOfRange { key: String, min: f64, max: f64 },
    /// Request parameter names a column the schema does not have
    UnknownColumn { param: String, column: String },
    /// Field cannot be compared against a query-string value
    NotFilterable(String),
    /// Value must be a non-negative integer
    ExpectedCount(String),
    InvalidGuid(String),
    /// Value has a shape the parameter does not accept
    InvalidShape(String),
    /// Parameter given more than once, or both as a value and with operators
    ExpectedSingle(String),
    MalformedBody(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAllowed(key) => write!(f, "\"{}\" is not allowed", key),
            ValidationError::ExpectedString(key) => write!(f, "\"{}\" must be a string", key),
            ValidationError::EmptyString(key) => {
                write!(f, "\"{}\" is not allowed to be empty", key)
            }
            ValidationError::ExpectedPositiveNumber(key) => {
                write!(f, "\"{}\" must be a positive number", key)
            }
            ValidationError::ExpectedObject(key) => write!(f, "\"{}\" must be an object", key),
            ValidationError::ExpectedNumber(key) => write!(f, "\"{}\" must be a number", key),
            ValidationError::OutOfRange { key, min, max } => {
                write!(f, "\"{}\" must be between {} and {}", key, min, max)
            }
            ValidationError::UnknownColumn { param, column } => {
                write!(f, "\"{}\" references unknown column \"{}\"", param, column)
            }
            ValidationError::NotFilterable(key) => {
                write!(f, "\"{}\" cannot be used as a filter", key)
            }
            ValidationError::ExpectedCount(key) => {
                write!(f, "\"{}\" must be a non-negative integer", key)
            }
            ValidationError::InvalidGuid(key) => write!(f, "\"{}\" must be a valid GUID", key),
            ValidationError::InvalidShape(key) => {
                write!(f, "\"{}\" must be a string or an array of strings", key)
            }
            ValidationError::ExpectedSingle(key) => {
                write!(f, "\"{}\" must be a single value or an operator map", key)
            }
            ValidationError::MalformedBody(reason) => {
                write!(f, "request body must be a JSON object: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::validation(err.to_string())
    }
}

/// Parse a path id; ids are UUIDs
pub fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidGuid(Schema::ID_FIELD.to_string()))
}

/// Check a create/replace/patch body. `id` is never writable.
pub fn validate_body(body: &IndexMap<String, Value>, schema: &Schema) -> Result<(), ValidationError> {
    for (key, value) in body {
        let field = schema
            .get(key)
            .ok_or_else(|| ValidationError::NotAllowed(key.clone()))?;
        validate_value(key, value, field.rule)?;
    }
    Ok(())
}

/// Check a single value against a rule
pub fn validate_value(key: &str, value: &Value, rule: FieldRule) -> Result<(), ValidationError> {
    match rule {
        FieldRule::Text => match value.as_str() {
            Some("") => return Err(ValidationError::EmptyString(key.to_string())),
            Some(_) => {}
            None => return Err(ValidationError::ExpectedString(key.to_string())),
        },
        FieldRule::PositiveNumber => match value.as_f64() {
            Some(number) if number > 0.0 => {}
            _ => return Err(ValidationError::ExpectedPositiveNumber(key.to_string())),
        },
        FieldRule::Coordinates => {
            let object = value
                .as_object()
                .ok_or_else(|| ValidationError::ExpectedObject(key.to_string()))?;
            for (coordinate, coordinate_value) in object {
                let (min, max) = match coordinate.as_str() {
                    "lat" => (-90.0, 90.0),
                    "lng" => (-180.0, 180.0),
                    _ => {
                        return Err(ValidationError::NotAllowed(format!(
                            "{}.{}",
                            key, coordinate
                        )))
                    }
                };
                let path = format!("{}.{}", key, coordinate);
                let number = coordinate_value
                    .as_f64()
                    .ok_or_else(|| ValidationError::ExpectedNumber(path.clone()))?;
                if number < min || number > max {
                    return Err(ValidationError::OutOfRange {
                        key: path,
                        min,
                        max,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Check a query-string filter value, which is always text, against a rule
pub fn validate_query_value(key: &str, raw: &str, rule: FieldRule) -> Result<(), ValidationError> {
    match rule {
        FieldRule::Text if raw.is_empty() => Err(ValidationError::EmptyString(key.to_string())),
        FieldRule::Text => Ok(()),
        FieldRule::PositiveNumber => match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() && number > 0.0 => Ok(()),
            _ => Err(ValidationError::ExpectedPositiveNumber(key.to_string())),
        },
        FieldRule::Coordinates => Err(ValidationError::NotFilterable(key.to_string())),
    }
}

/// Check that a `fields` / `sort` entry names a real column
pub fn validate_column(param: &str, column: &str, schema: &Schema) -> Result<(), ValidationError> {
    if schema.has_column(column) {
        Ok(())
    } else {
        Err(ValidationError::UnknownColumn {
            param: param.to_string(),
            column: column.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::moths_schema;
    use serde_json::json;

    fn body(value: Value) -> IndexMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_body() {
        let schema = moths_schema();
        let body = body(json!({
            "species": "luna",
            "wingspan": 11.5,
            "weight": 2,
            "last_spotted": {"lat": 45.1, "lng": -122.6}
        }));
        assert!(validate_body(&body, &schema).is_ok());
    }

    #[test]
    fn test_partial_body_is_valid() {
        let schema = moths_schema();
        assert!(validate_body(&body(json!({"weight": 2})), &schema).is_ok());
        assert!(validate_body(&IndexMap::new(), &schema).is_ok());
    }

    #[test]
    fn test_id_is_forbidden() {
        let schema = moths_schema();
        let err = validate_body(&body(json!({"id": "x", "weight": 2})), &schema).unwrap_err();
        assert_eq!(err.to_string(), "\"id\" is not allowed");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let schema = moths_schema();
        let err = validate_body(&body(json!({"colour": "brown"})), &schema).unwrap_err();
        assert_eq!(err, ValidationError::NotAllowed("colour".to_string()));
    }

    #[test]
    fn test_rule_violations() {
        let schema = moths_schema();
        let cases = vec![
            (json!({"species": 4}), "\"species\" must be a string"),
            (json!({"species": ""}), "\"species\" is not allowed to be empty"),
            (json!({"weight": -1}), "\"weight\" must be a positive number"),
            (json!({"wingspan": "wide"}), "\"wingspan\" must be a positive number"),
            (json!({"weight": null}), "\"weight\" must be a positive number"),
            (json!({"last_spotted": [1, 2]}), "\"last_spotted\" must be an object"),
            (
                json!({"last_spotted": {"lat": 91}}),
                "\"last_spotted.lat\" must be between -90 and 90",
            ),
            (
                json!({"last_spotted": {"lng": "east"}}),
                "\"last_spotted.lng\" must be a number",
            ),
            (
                json!({"last_spotted": {"alt": 3}}),
                "\"last_spotted.alt\" is not allowed",
            ),
        ];

        for (input, message) in cases {
            let err = validate_body(&body(input), &schema).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_query_values() {
        assert!(validate_query_value("weight", "4", FieldRule::PositiveNumber).is_ok());
        assert!(validate_query_value("weight", "007.50", FieldRule::PositiveNumber).is_ok());
        assert!(validate_query_value("species", "007.50", FieldRule::Text).is_ok());

        let cases = vec![
            ("weight", "abc", FieldRule::PositiveNumber, "\"weight\" must be a positive number"),
            ("wingspan", "-5", FieldRule::PositiveNumber, "\"wingspan\" must be a positive number"),
            ("wingspan", "NaN", FieldRule::PositiveNumber, "\"wingspan\" must be a positive number"),
            ("species", "", FieldRule::Text, "\"species\" is not allowed to be empty"),
            ("last_spotted", "x", FieldRule::Coordinates, "\"last_spotted\" cannot be used as a filter"),
        ];
        for (key, raw, rule, message) in cases {
            assert_eq!(validate_query_value(key, raw, rule).unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("6d70b787-8cd2-4cc4-b441-498093add3a7").is_ok());
        let err = parse_id("bad-id").unwrap_err();
        assert_eq!(err.to_string(), "\"id\" must be a valid GUID");
    }

    #[test]
    fn test_validate_column() {
        let schema = moths_schema();
        assert!(validate_column("fields", "id", &schema).is_ok());
        assert!(validate_column("sort", "weight", &schema).is_ok());
        let err = validate_column("fields", "weight; DROP TABLE moths", &schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"fields\" references unknown column \"weight; DROP TABLE moths\""
        );
    }

    #[test]
    fn test_validation_error_converts_to_bad_request() {
        let err: StoreError = ValidationError::ExpectedCount("limit".to_string()).into();
        assert_eq!(err.code(), Some(400));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "\"limit\" must be a non-negative integer");
    }
}
