use crate::prelude::ModelData;
use crate::schema::options::VarOptions;
use crate::store::http_error::HttpError;
use crate::store::state::PlotLayout;
use crate::trace::Trace;
use std::collections::BTreeMap;

/// Synchronous state transitions accepted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddPlot,
    RemovePlot(u32),
    UpdatePlotData(Vec<Trace>),
    UpdatePlotLayout { id: u32, layout: PlotLayout },
    SetCommunicationError(bool),
    SetHttpError(HttpError),
    SetModelData(ModelData),
    SetVarsData(BTreeMap<String, VarOptions>),
    ShowErrorModal,
    HideErrorModal,
    ShowFullscreenPlot,
    HideFullscreenPlot,
}

impl Mutation {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddPlot => "addPlot",
            Mutation::RemovePlot(_) => "removePlot",
            Mutation::UpdatePlotData(_) => "updatePlotData",
            Mutation::UpdatePlotLayout { .. } => "updatePlotLayout",
            Mutation::SetCommunicationError(_) => "setCommunicationError",
            Mutation::SetHttpError(_) => "setHttpError",
            Mutation::SetModelData(_) => "setModelData",
            Mutation::SetVarsData(_) => "setVarsData",
            Mutation::ShowErrorModal => "showErrorModal",
            Mutation::HideErrorModal => "hideErrorModal",
            Mutation::ShowFullscreenPlot => "showFullscreenPlot",
            Mutation::HideFullscreenPlot => "hideFullscreenPlot",
        }
    }
}
