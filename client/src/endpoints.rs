use serde::{Deserialize, Serialize};

/// Endpoint paths of one backend version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub data: String,
    pub options: String,
    /// Separate model endpoint; `None` when the model rides in the data payload.
    pub model: Option<String>,
    pub poll: String,
}

impl Endpoints {
    /// `/data` with the model embedded.
    pub fn current() -> Self {
        Self {
            data: "/data".into(),
            options: "/get_options".into(),
            model: None,
            poll: "/poll".into(),
        }
    }

    /// `/get_data` plus a standalone `/get_model`.
    pub fn legacy() -> Self {
        Self {
            data: "/get_data".into(),
            options: "/get_options".into(),
            model: Some("/get_model".into()),
            poll: "/poll".into(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::current()
    }
}
