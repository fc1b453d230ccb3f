use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
    Markers,
}

impl TraceMode {
    /// A single sample cannot form a line.
    pub fn for_samples(count: usize) -> Self {
        if count > 1 {
            TraceMode::Lines
        } else {
            TraceMode::Markers
        }
    }
}

/// Plot visibility tri-state: drawn, hidden, or listed in the legend only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    LegendOnly,
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Visibility::Visible => serializer.serialize_bool(true),
            Visibility::Hidden => serializer.serialize_bool(false),
            Visibility::LegendOnly => serializer.serialize_str("legendonly"),
        }
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Visibility::Visible),
            Raw::Flag(false) => Ok(Visibility::Hidden),
            Raw::Text(text) => match text.as_str() {
                "legendonly" => Ok(Visibility::LegendOnly),
                "true" => Ok(Visibility::Visible),
                "false" => Ok(Visibility::Hidden),
                other => Err(serde::de::Error::custom(format!(
                    "unknown visibility `{other}`"
                ))),
            },
        }
    }
}

/// One named x/y series ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: TraceMode,
    #[serde(rename = "type", default = "scatter")]
    pub kind: String,
    pub visible: Visibility,
    #[serde(default)]
    pub group: String,
}

fn scatter() -> String {
    "scatter".to_string()
}

impl Trace {
    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.y.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_depends_on_sample_count() {
        assert_eq!(TraceMode::for_samples(0), TraceMode::Markers);
        assert_eq!(TraceMode::for_samples(1), TraceMode::Markers);
        assert_eq!(TraceMode::for_samples(2), TraceMode::Lines);
    }

    #[test]
    fn visibility_uses_plot_wire_values() {
        assert_eq!(serde_json::to_value(Visibility::Visible).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(Visibility::Hidden).unwrap(), json!(false));
        assert_eq!(
            serde_json::to_value(Visibility::LegendOnly).unwrap(),
            json!("legendonly")
        );
        let legacy: Visibility = serde_json::from_value(json!("true")).unwrap();
        assert_eq!(legacy, Visibility::Visible);
        assert!(serde_json::from_value::<Visibility>(json!("maybe")).is_err());
    }

    #[test]
    fn trace_serializes_type_field() {
        let trace = Trace {
            name: "v1".into(),
            x: vec![0.0],
            y: vec![1.0],
            mode: TraceMode::Markers,
            kind: scatter(),
            visible: Visibility::Visible,
            group: "variables".into(),
        };
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], json!("scatter"));
        assert_eq!(value["mode"], json!("markers"));
        assert_eq!(trace.latest(), Some(1.0));
    }
}
