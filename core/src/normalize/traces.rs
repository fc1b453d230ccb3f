use crate::schema::data::{DataPayload, DEFAULT_GROUP};
use crate::trace::{Trace, TraceMode, Visibility};

/// Above this many variables every trace starts out legend-only.
pub const MAX_VISIBLE_VARIABLES: usize = 5;
/// Group whose traces always start out legend-only.
pub const LEGEND_ONLY_GROUP: &str = "intermediates";

pub fn visibility_for(group: &str, total_variables: usize) -> Visibility {
    if total_variables > MAX_VISIBLE_VARIABLES || group == LEGEND_ONLY_GROUP {
        Visibility::LegendOnly
    } else {
        Visibility::Visible
    }
}

/// Flattens a data payload into one trace per leaf variable, in response
/// order. The x axis is the variable's own, else the shared time axis,
/// else the sample indices.
pub fn normalize(payload: &DataPayload) -> Vec<Trace> {
    let total = payload.variable_count();
    match payload {
        DataPayload::Nested(nested) => nested
            .groups
            .iter()
            .flat_map(|group| {
                group.variables.iter().map(move |variable| {
                    let x = variable
                        .x
                        .clone()
                        .or_else(|| nested.time.clone())
                        .unwrap_or_else(|| sample_indices(variable.data.len()));
                    build_trace(&variable.name, &group.name, x, variable.data.clone(), total)
                })
            })
            .collect(),
        DataPayload::Flat(flat) => flat
            .series
            .iter()
            .map(|(name, values)| {
                let x = flat
                    .time
                    .clone()
                    .unwrap_or_else(|| sample_indices(values.len()));
                build_trace(name, DEFAULT_GROUP, x, values.clone(), total)
            })
            .collect(),
        DataPayload::Unavailable => Vec::new(),
    }
}

fn build_trace(name: &str, group: &str, x: Vec<f64>, y: Vec<f64>, total: usize) -> Trace {
    Trace {
        name: name.to_string(),
        mode: TraceMode::for_samples(y.len()),
        x,
        y,
        kind: "scatter".to_string(),
        visible: visibility_for(group, total),
        group: group.to_string(),
    }
}

fn sample_indices(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}
