//! Validation error types and JSON field readers

use std::fmt;

use serde_json::Value;

/// Validation error for insert payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent or null
    Missing { field: &'static str },

    /// Field present but with the wrong JSON type
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// String doesn't match required format (e.g. a path id)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "missing required field '{}'", field),
            Self::InvalidType { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Read a required string field.
pub(crate) fn required_string(
    field: &'static str,
    value: Option<Value>,
) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// Read an optional string field; `null` counts as absent.
pub(crate) fn optional_string(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// Read a required label that may arrive as a string or a number.
///
/// Numbers keep their JSON text (`19` becomes `"19"`).
pub(crate) fn required_label(
    field: &'static str,
    value: Option<Value>,
) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "a string or a number",
        }),
    }
}

/// Read a required integer field.
pub(crate) fn required_integer(
    field: &'static str,
    value: Option<Value>,
) -> Result<i64, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::Number(n)) => n.as_i64().ok_or(ValidationError::InvalidType {
            field,
            expected: "an integer",
        }),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "an integer",
        }),
    }
}
