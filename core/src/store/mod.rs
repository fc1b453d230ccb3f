//! Dashboard state container.
//!
//! State only changes through [`Mutation`]s applied by the pure [`reduce`]
//! function; [`Store`] owns one state value and commits mutations to it.

pub mod http_error;
pub mod mutation;
pub mod reducer;
pub mod state;

pub use http_error::{HttpError, BUG_REPORT_FOOTER};
pub use mutation::Mutation;
pub use reducer::reduce;
pub use state::{DashboardState, Panel, PlotLayout, FULLSCREEN_PANEL_ID};

use log::trace;

#[derive(Debug, Default)]
pub struct Store {
    state: DashboardState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: DashboardState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn commit(&mut self, mutation: Mutation) {
        trace!("commit {}", mutation.name());
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, mutation);
    }
}
