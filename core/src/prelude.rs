use serde_json::{Map, Value};

/// Opaque model attribute map, passed through to views unmodified.
pub type ModelData = Map<String, Value>;

/// Common error type for response validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{endpoint}: expected a JSON object, got {found}")]
    NotAnObject { endpoint: String, found: String },
    #[error("{endpoint}: missing field `{field}`")]
    MissingField { endpoint: String, field: String },
    #[error("{endpoint}: invalid field `{field}`: {reason}")]
    InvalidField {
        endpoint: String,
        field: String,
        reason: String,
    },
    #[error("{endpoint}: duplicate variable name `{name}`")]
    DuplicateName { endpoint: String, name: String },
    #[error("{endpoint}: backend reported error {code}: {text}")]
    BackendReported {
        endpoint: String,
        code: u16,
        text: String,
    },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Short description of a JSON value's kind, used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
