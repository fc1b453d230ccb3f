use super::{as_object, check_backend_error, is_unavailable};
use crate::prelude::{json_kind, SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option keys describing the solver itself rather than a variable.
pub const IGNORED_OPTION_KEYS: [&str; 2] = ["INFO", "APM"];

/// Key carrying the per-variable visibility preference.
pub const HIDDEN_FIELD: &str = "ishidden";

/// Metadata for one variable option, as kept in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarOptions {
    pub ishidden: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Default for VarOptions {
    fn default() -> Self {
        Self {
            ishidden: true,
            attributes: Map::new(),
        }
    }
}

/// Validated response of the options endpoint, solver keys removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionsPayload {
    pub available: bool,
    pub entries: Vec<(String, Map<String, Value>)>,
}

impl OptionsPayload {
    pub fn parse(endpoint: &str, value: &Value) -> SchemaResult<Self> {
        let object = as_object(endpoint, value)?;
        check_backend_error(endpoint, object)?;
        if is_unavailable(object) {
            return Ok(Self::default());
        }

        let mut entries = Vec::with_capacity(object.len());
        for (key, entry) in object {
            if IGNORED_OPTION_KEYS.contains(&key.as_str()) {
                continue;
            }
            let mut attributes = entry
                .as_object()
                .cloned()
                .ok_or_else(|| SchemaError::InvalidField {
                    endpoint: endpoint.to_string(),
                    field: key.clone(),
                    reason: format!("expected an options object, got {}", json_kind(entry)),
                })?;
            // Visibility is owned by the dashboard, not the backend.
            attributes.remove(HIDDEN_FIELD);
            entries.push((key.clone(), attributes));
        }

        Ok(Self {
            available: true,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn solver_keys_are_filtered() {
        let value = json!({"INFO": {}, "APM": {"IMODE": 3}, "k1": {"LOWER": 0}});
        let payload = OptionsPayload::parse("/get_options", &value).unwrap();
        assert!(payload.available);
        assert_eq!(payload.entries.len(), 1);
        assert_eq!(payload.entries[0].0, "k1");
        assert_eq!(payload.entries[0].1.get("LOWER"), Some(&json!(0)));
    }

    #[test]
    fn scalar_option_entry_is_rejected() {
        let err = OptionsPayload::parse("/get_options", &json!({"k1": 3})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { ref field, .. } if field == "k1"));
    }

    #[test]
    fn var_options_serialize_flat() {
        let mut attributes = Map::new();
        attributes.insert("UNIT".into(), json!("m"));
        let options = VarOptions {
            ishidden: false,
            attributes,
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"ishidden": false, "UNIT": "m"})
        );
    }
}
