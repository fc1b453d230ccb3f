//! Explicit validators for every backend response the dashboard consumes.
//!
//! Responses are decoded into `serde_json::Value` by the transport and then
//! checked here, so a shape mismatch becomes a [`SchemaError`] naming the
//! endpoint and field instead of a panic deep inside normalization.

pub mod data;
pub mod options;
pub mod poll;

pub use data::{DataPayload, FlatData, NestedData, VariableGroup, VariableRecord};
pub use options::{OptionsPayload, VarOptions, IGNORED_OPTION_KEYS};
pub use poll::PollStatus;

use crate::prelude::{json_kind, ModelData, SchemaError, SchemaResult};
use serde_json::{Map, Value};

/// Field the backend sets to `false` before any results exist.
pub const DATA_AVAILABLE_FIELD: &str = "dataAvailable";

pub(crate) fn as_object<'a>(
    endpoint: &str,
    value: &'a Value,
) -> SchemaResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| SchemaError::NotAnObject {
        endpoint: endpoint.to_string(),
        found: json_kind(value).to_string(),
    })
}

/// Rejects the `{error, text}` object the backend's error handlers emit
/// with a success status.
pub(crate) fn check_backend_error(
    endpoint: &str,
    object: &Map<String, Value>,
) -> SchemaResult<()> {
    if object.len() != 2 {
        return Ok(());
    }
    let code = object.get("error").and_then(Value::as_u64);
    let text = object.get("text").and_then(Value::as_str);
    match (code, text) {
        (Some(code), Some(text)) => Err(SchemaError::BackendReported {
            endpoint: endpoint.to_string(),
            code: u16::try_from(code).unwrap_or(u16::MAX),
            text: text.to_string(),
        }),
        _ => Ok(()),
    }
}

pub(crate) fn is_unavailable(object: &Map<String, Value>) -> bool {
    matches!(object.get(DATA_AVAILABLE_FIELD), Some(Value::Bool(false)))
}

pub(crate) fn parse_series(endpoint: &str, field: &str, value: &Value) -> SchemaResult<Vec<f64>> {
    let items = value.as_array().ok_or_else(|| SchemaError::InvalidField {
        endpoint: endpoint.to_string(),
        field: field.to_string(),
        reason: format!("expected an array, got {}", json_kind(value)),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64().ok_or_else(|| SchemaError::InvalidField {
                endpoint: endpoint.to_string(),
                field: field.to_string(),
                reason: format!("element {index} is a {}", json_kind(item)),
            })
        })
        .collect()
}

/// Validates a standalone model endpoint response.
pub fn parse_model(endpoint: &str, value: &Value) -> SchemaResult<ModelData> {
    let object = as_object(endpoint, value)?;
    check_backend_error(endpoint, object)?;
    Ok(object.clone())
}
