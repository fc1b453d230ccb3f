use super::{as_object, check_backend_error, is_unavailable, parse_series};
use crate::prelude::{json_kind, ModelData, SchemaError, SchemaResult};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Key of the shared time axis in both data layouts.
pub const TIME_FIELD: &str = "time";
/// Group that flat payloads are reported under.
pub const DEFAULT_GROUP: &str = "variables";

/// Validated response of the data endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPayload {
    /// `{ model?, time?, vars: { group: [...] } }`
    Nested(NestedData),
    /// `{ time?, series: [...], ... }`
    Flat(FlatData),
    /// The backend has not produced any results yet.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedData {
    pub model: Option<ModelData>,
    pub time: Option<Vec<f64>>,
    pub groups: Vec<VariableGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableGroup {
    pub name: String,
    pub variables: Vec<VariableRecord>,
}

/// One leaf variable: its own optional x axis plus the sampled values.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRecord {
    pub name: String,
    pub data: Vec<f64>,
    pub x: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatData {
    pub time: Option<Vec<f64>>,
    pub series: Vec<(String, Vec<f64>)>,
}

impl DataPayload {
    pub fn parse(endpoint: &str, value: &Value) -> SchemaResult<Self> {
        let object = as_object(endpoint, value)?;
        check_backend_error(endpoint, object)?;
        if is_unavailable(object) {
            return Ok(DataPayload::Unavailable);
        }

        let payload = if object.contains_key("vars") {
            DataPayload::Nested(parse_nested(endpoint, object)?)
        } else {
            DataPayload::Flat(parse_flat(endpoint, object)?)
        };
        payload.ensure_unique_names(endpoint)?;
        Ok(payload)
    }

    /// Total number of leaf variables across all groups.
    pub fn variable_count(&self) -> usize {
        match self {
            DataPayload::Nested(nested) => nested.groups.iter().map(|g| g.variables.len()).sum(),
            DataPayload::Flat(flat) => flat.series.len(),
            DataPayload::Unavailable => 0,
        }
    }

    /// Model attributes embedded in the payload, if any.
    pub fn model(&self) -> Option<&ModelData> {
        match self {
            DataPayload::Nested(nested) => nested.model.as_ref(),
            _ => None,
        }
    }

    fn names(&self) -> Vec<&str> {
        match self {
            DataPayload::Nested(nested) => nested
                .groups
                .iter()
                .flat_map(|g| g.variables.iter().map(|v| v.name.as_str()))
                .collect(),
            DataPayload::Flat(flat) => flat.series.iter().map(|(name, _)| name.as_str()).collect(),
            DataPayload::Unavailable => Vec::new(),
        }
    }

    fn ensure_unique_names(&self, endpoint: &str) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for name in self.names() {
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateName {
                    endpoint: endpoint.to_string(),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_time(endpoint: &str, object: &Map<String, Value>) -> SchemaResult<Option<Vec<f64>>> {
    match object.get(TIME_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse_series(endpoint, TIME_FIELD, value).map(Some),
    }
}

fn parse_nested(endpoint: &str, object: &Map<String, Value>) -> SchemaResult<NestedData> {
    let model = match object.get("model") {
        None | Some(Value::Null) => None,
        Some(Value::Object(model)) => Some(model.clone()),
        Some(other) => {
            return Err(SchemaError::InvalidField {
                endpoint: endpoint.to_string(),
                field: "model".into(),
                reason: format!("expected an object, got {}", json_kind(other)),
            })
        }
    };
    let time = parse_time(endpoint, object)?;

    let vars = object
        .get("vars")
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::InvalidField {
            endpoint: endpoint.to_string(),
            field: "vars".into(),
            reason: "expected an object of variable groups".into(),
        })?;

    let mut groups = Vec::with_capacity(vars.len());
    for (group_name, members) in vars {
        let field = format!("vars.{group_name}");
        let variables = match members {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    parse_record(endpoint, &format!("{field}[{index}]"), item, None)
                })
                .collect::<SchemaResult<Vec<_>>>()?,
            Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| parse_record(endpoint, &format!("{field}.{key}"), item, Some(key)))
                .collect::<SchemaResult<Vec<_>>>()?,
            other => {
                return Err(SchemaError::InvalidField {
                    endpoint: endpoint.to_string(),
                    field,
                    reason: format!("expected an array or object, got {}", json_kind(other)),
                })
            }
        };
        groups.push(VariableGroup {
            name: group_name.clone(),
            variables,
        });
    }

    Ok(NestedData {
        model,
        time,
        groups,
    })
}

fn parse_record(
    endpoint: &str,
    field: &str,
    value: &Value,
    key: Option<&str>,
) -> SchemaResult<VariableRecord> {
    let object = value.as_object().ok_or_else(|| SchemaError::InvalidField {
        endpoint: endpoint.to_string(),
        field: field.to_string(),
        reason: format!("expected a variable object, got {}", json_kind(value)),
    })?;

    let name = match (object.get("name").and_then(Value::as_str), key) {
        (Some(name), _) => name.to_string(),
        (None, Some(key)) => key.to_string(),
        (None, None) => {
            return Err(SchemaError::MissingField {
                endpoint: endpoint.to_string(),
                field: format!("{field}.name"),
            })
        }
    };

    let data = object.get("data").ok_or_else(|| SchemaError::MissingField {
        endpoint: endpoint.to_string(),
        field: format!("{field}.data"),
    })?;
    let data = parse_series(endpoint, &format!("{field}.data"), data)?;

    let x = match object.get("x") {
        None | Some(Value::Null) => None,
        Some(axis) => Some(parse_series(endpoint, &format!("{field}.x"), axis)?),
    };

    Ok(VariableRecord { name, data, x })
}

fn parse_flat(endpoint: &str, object: &Map<String, Value>) -> SchemaResult<FlatData> {
    let time = parse_time(endpoint, object)?;
    let series = object
        .iter()
        .filter(|(key, _)| key.as_str() != TIME_FIELD)
        .map(|(key, value)| parse_series(endpoint, key, value).map(|series| (key.clone(), series)))
        .collect::<SchemaResult<Vec<_>>>()?;
    Ok(FlatData { time, series })
}
