use crate::prelude::ModelData;
use crate::schema::options::VarOptions;
use crate::store::http_error::HttpError;
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Id of the panel created first by `initialize`, shown only in fullscreen.
pub const FULLSCREEN_PANEL_ID: u32 = 0;

/// Per-panel layout overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlotLayout {
    pub fn with_height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }
}

/// An open plot view over its own copy of the trace list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: u32,
    pub data: Vec<Trace>,
    pub layout: PlotLayout,
}

impl Panel {
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|trace| trace.name == name)
    }
}

/// Everything a view needs to render the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub plots: Vec<Panel>,
    pub plot_data: Vec<Trace>,
    pub model_data: ModelData,
    pub vars_data: BTreeMap<String, VarOptions>,
    pub communication_error: bool,
    pub show_error_modal: bool,
    pub http_error: HttpError,
    pub fullscreen_plot: bool,
    pub plot_id_counter: u32,
    pub update_number: u64,
    /// Number of times an error transition has surfaced the modal.
    pub modal_episodes: u64,
}

impl DashboardState {
    pub fn num_plots(&self) -> usize {
        self.plots.len()
    }

    pub fn panel(&self, id: u32) -> Option<&Panel> {
        self.plots.iter().find(|panel| panel.id == id)
    }

    /// Panels meant for the main page, i.e. everything but fullscreen.
    pub fn visible_panels(&self) -> impl Iterator<Item = &Panel> {
        self.plots
            .iter()
            .filter(|panel| panel.id != FULLSCREEN_PANEL_ID)
    }
}
