use crate::store::mutation::Mutation;
use crate::store::state::{DashboardState, Panel};
use crate::trace::Trace;
use log::debug;

/// Applies one mutation. Total: every mutation is valid in every state.
pub fn reduce(mut state: DashboardState, mutation: Mutation) -> DashboardState {
    match mutation {
        Mutation::AddPlot => {
            state.plots.push(Panel {
                id: state.plot_id_counter,
                data: state.plot_data.clone(),
                layout: Default::default(),
            });
            state.plot_id_counter += 1;
        }
        Mutation::RemovePlot(id) => state.plots.retain(|panel| panel.id != id),
        Mutation::UpdatePlotData(traces) => {
            for panel in &mut state.plots {
                refresh_panel(panel, &traces);
            }
            state.plot_data = traces;
            state.update_number += 1;
        }
        Mutation::UpdatePlotLayout { id, layout } => {
            if let Some(panel) = state.plots.iter_mut().find(|panel| panel.id == id) {
                panel.layout = layout;
            }
        }
        Mutation::SetCommunicationError(true) => {
            if !state.communication_error {
                state.communication_error = true;
                if !state.show_error_modal {
                    state.show_error_modal = true;
                    state.modal_episodes += 1;
                }
            }
        }
        Mutation::SetCommunicationError(false) => state.communication_error = false,
        Mutation::SetHttpError(error) => state.http_error = error,
        Mutation::SetModelData(model) => state.model_data = model,
        Mutation::SetVarsData(vars) => state.vars_data = vars,
        Mutation::ShowErrorModal => state.show_error_modal = true,
        Mutation::HideErrorModal => state.show_error_modal = false,
        Mutation::ShowFullscreenPlot => state.fullscreen_plot = true,
        Mutation::HideFullscreenPlot => state.fullscreen_plot = false,
    }
    state
}

/// Overwrites x/y of every panel trace that has a same-named counterpart.
/// Visibility and mode stay as the panel has them; unmatched traces are
/// left untouched.
fn refresh_panel(panel: &mut Panel, traces: &[Trace]) {
    for trace in &mut panel.data {
        match traces.iter().find(|updated| updated.name == trace.name) {
            Some(updated) => {
                trace.x.clone_from(&updated.x);
                trace.y.clone_from(&updated.y);
            }
            None => debug!("panel {}: no refreshed data for trace {}", panel.id, trace.name),
        }
    }
}
