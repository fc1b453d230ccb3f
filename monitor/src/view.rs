use dashcore::store::DashboardState;
use dashcore::telemetry::PollCounters;
use dashcore::{Trace, Visibility};
use std::io::{self, Write};

/// Terminal rendering of the dashboard. Only writes what changed since the
/// previous call.
#[derive(Debug, Default)]
pub struct ConsoleView {
    last_update: u64,
    last_episode: u64,
    communication_error: bool,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the error modal was shown and may be dismissed.
    pub fn render<W: Write>(&mut self, state: &DashboardState, out: &mut W) -> io::Result<bool> {
        if state.update_number != self.last_update {
            self.last_update = state.update_number;
            writeln!(
                out,
                "[dashboard] update {}: {} traces, {} panels",
                state.update_number,
                state.plot_data.len(),
                state.num_plots()
            )?;
            for panel in state.visible_panels() {
                writeln!(out, "  panel {}", panel.id)?;
                for trace in panel.data.iter().filter(|t| t.visible != Visibility::Hidden) {
                    writeln!(out, "    {}", describe(trace))?;
                }
            }
        }

        let mut shown = false;
        if state.show_error_modal && state.modal_episodes > self.last_episode {
            self.last_episode = state.modal_episodes;
            let error = &state.http_error;
            writeln!(out, "[dashboard] {}", error.header)?;
            writeln!(out, "  {}", error.body)?;
            writeln!(out, "  {}", error.report)?;
            shown = true;
        }

        if self.communication_error && !state.communication_error {
            writeln!(out, "[dashboard] communication restored")?;
        }
        self.communication_error = state.communication_error;

        Ok(shown)
    }
}

fn describe(trace: &Trace) -> String {
    let latest = trace
        .latest()
        .map(|value| format!("{value:.4}"))
        .unwrap_or_else(|| "n/a".into());
    let legend = if trace.visible == Visibility::LegendOnly {
        " (legend only)"
    } else {
        ""
    };
    format!(
        "{} [{}] samples {} latest {}{}",
        trace.name,
        trace.group,
        trace.y.len(),
        latest,
        legend
    )
}

pub fn summary(counters: PollCounters) -> String {
    format!(
        "polls {}, failures {}, refreshes {}",
        counters.polls, counters.failures, counters.refreshes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashcore::store::{reduce, HttpError, Mutation};
    use dashcore::TraceMode;

    fn trace(name: &str, visible: Visibility) -> Trace {
        Trace {
            name: name.into(),
            x: vec![0.0, 1.0],
            y: vec![2.0, 3.5],
            mode: TraceMode::Lines,
            kind: "scatter".into(),
            visible,
            group: "variables".into(),
        }
    }

    fn render(view: &mut ConsoleView, state: &DashboardState) -> (String, bool) {
        let mut out = Vec::new();
        let shown = view.render(state, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), shown)
    }

    fn state_with(mutations: Vec<Mutation>) -> DashboardState {
        mutations
            .into_iter()
            .fold(DashboardState::default(), reduce)
    }

    #[test]
    fn update_lists_visible_panels_only() {
        let state = state_with(vec![
            Mutation::UpdatePlotData(vec![
                trace("a", Visibility::Visible),
                trace("b", Visibility::LegendOnly),
                trace("c", Visibility::Hidden),
            ]),
            Mutation::AddPlot,
            Mutation::AddPlot,
        ]);
        let mut view = ConsoleView::new();
        let (text, shown) = render(&mut view, &state);

        assert!(!shown);
        assert!(text.contains("update 1: 3 traces, 2 panels"));
        assert!(!text.contains("panel 0"));
        assert!(text.contains("panel 1"));
        assert!(text.contains("a [variables] samples 2 latest 3.5000"));
        assert!(text.contains("b [variables] samples 2 latest 3.5000 (legend only)"));
        assert!(!text.contains("c [variables]"));

        let (again, _) = render(&mut view, &state);
        assert!(again.is_empty());
    }

    #[test]
    fn modal_is_rendered_once_per_episode() {
        let mut state = state_with(vec![
            Mutation::SetHttpError(HttpError::no_response("refused")),
            Mutation::SetCommunicationError(true),
        ]);
        let mut view = ConsoleView::new();

        let (text, shown) = render(&mut view, &state);
        assert!(shown);
        assert!(text.contains("Internal Communication Error"));
        assert!(text.contains("refused"));

        state = reduce(state, Mutation::HideErrorModal);
        state = reduce(state, Mutation::SetCommunicationError(true));
        let (text, shown) = render(&mut view, &state);
        assert!(!shown);
        assert!(text.is_empty());

        state = reduce(state, Mutation::SetCommunicationError(false));
        let (text, _) = render(&mut view, &state);
        assert!(text.contains("communication restored"));
    }

    #[test]
    fn summary_lists_counters() {
        let counters = PollCounters {
            polls: 5,
            failures: 2,
            refreshes: 1,
        };
        assert_eq!(summary(counters), "polls 5, failures 2, refreshes 1");
    }
}
