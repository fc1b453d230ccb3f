use super::{as_object, check_backend_error, is_unavailable};
use crate::prelude::{json_kind, SchemaError, SchemaResult};
use serde_json::Value;

/// Answer to "has anything changed since the last data fetch?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStatus {
    pub updates: bool,
}

impl PollStatus {
    /// Accepts both `updates` and the older `Updates` spelling.
    pub fn parse(endpoint: &str, value: &Value) -> SchemaResult<Self> {
        let object = as_object(endpoint, value)?;
        check_backend_error(endpoint, object)?;

        let flag = object.get("updates").or_else(|| object.get("Updates"));
        match flag {
            Some(Value::Bool(updates)) => Ok(Self { updates: *updates }),
            Some(other) => Err(SchemaError::InvalidField {
                endpoint: endpoint.to_string(),
                field: "updates".into(),
                reason: format!("expected a boolean, got {}", json_kind(other)),
            }),
            None if is_unavailable(object) => Ok(Self { updates: false }),
            None => Err(SchemaError::MissingField {
                endpoint: endpoint.to_string(),
                field: "updates".into(),
            }),
        }
    }
}
