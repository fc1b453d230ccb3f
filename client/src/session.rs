use crate::endpoints::Endpoints;
use crate::fetcher::SnapshotFetcher;
use crate::poll::PollHandle;
use crate::transport::Transport;
use dashcore::normalize::{normalize, reconcile_options};
use dashcore::schema::DataPayload;
use dashcore::store::{DashboardState, Mutation, PlotLayout, Store};
use dashcore::telemetry::{EventLog, PollCounters, PollMetrics};
use log::{debug, info, warn};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::watch;

/// Vertical space taken by page chrome around the fullscreen panel.
pub const CHROME_OFFSET: f64 = 150.0;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 900.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub poll_interval: Duration,
    pub viewport_height: f64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Which parts of a snapshot made it into the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub data: bool,
    pub options: bool,
    pub model: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Unchanged,
    Refreshed,
    Failed,
}

/// One dashboard: its store plus the actions that fill it from the backend.
pub struct Dashboard<T> {
    store: RwLock<Store>,
    fetcher: SnapshotFetcher<T>,
    options: DashboardOptions,
    revision: watch::Sender<u64>,
    metrics: PollMetrics,
    events: EventLog,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(transport: T, endpoints: Endpoints, options: DashboardOptions) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            store: RwLock::new(Store::new()),
            fetcher: SnapshotFetcher::new(transport, endpoints),
            options,
            revision,
            metrics: PollMetrics::new(),
            events: EventLog::default(),
        }
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn fetcher(&self) -> &SnapshotFetcher<T> {
        &self.fetcher
    }

    pub fn metrics(&self) -> PollCounters {
        self.metrics.snapshot()
    }

    /// Clone of the current state.
    pub fn state(&self) -> DashboardState {
        self.read(DashboardState::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        f(store.state())
    }

    pub fn commit(&self, mutation: Mutation) {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .commit(mutation);
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Receiver that changes after every commit.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Fetches a full snapshot and commits whatever arrived intact.
    /// Failed parts are logged and leave the previous data in place.
    pub async fn get_data(&self) -> RefreshReport {
        let snapshot = self.fetcher.fetch_snapshot().await;
        let endpoints = self.fetcher.endpoints();
        let mut report = RefreshReport::default();

        match snapshot.data {
            Ok(DataPayload::Unavailable) => info!("{}: backend has no results yet", endpoints.data),
            Ok(payload) => {
                if let Some(model) = payload.model() {
                    self.commit(Mutation::SetModelData(model.clone()));
                    report.model = true;
                }
                let traces = normalize(&payload);
                debug!("{}: {} traces", endpoints.data, traces.len());
                self.commit(Mutation::UpdatePlotData(traces));
                report.data = true;
            }
            Err(err) => warn!("error fetching {}: {err}", endpoints.data),
        }

        match snapshot.model {
            Some(Ok(model)) => {
                self.commit(Mutation::SetModelData(model));
                report.model = true;
            }
            Some(Err(err)) => warn!("error fetching model: {err}"),
            None => {}
        }

        match snapshot.options {
            Ok(payload) if payload.available => {
                let vars = self.read(|state| reconcile_options(payload, &state.vars_data));
                self.commit(Mutation::SetVarsData(vars));
                report.options = true;
            }
            Ok(_) => info!("{}: backend has no options yet", endpoints.options),
            Err(err) => warn!("error fetching {}: {err}", endpoints.options),
        }

        report
    }

    /// Loads the first snapshot, then opens the fullscreen panel (sized to
    /// the viewport) and the main panel.
    pub async fn initialize(&self) -> RefreshReport {
        let report = self.get_data().await;

        self.commit(Mutation::AddPlot);
        if let Some(id) = self.read(|state| state.plots.last().map(|panel| panel.id)) {
            let height = (self.options.viewport_height - CHROME_OFFSET).max(0.0);
            self.commit(Mutation::UpdatePlotLayout {
                id,
                layout: PlotLayout::with_height(height),
            });
        }
        self.commit(Mutation::AddPlot);

        report
    }

    /// Asks the backend for changes once, refreshing when it has any.
    pub async fn poll_once(&self) -> PollOutcome {
        self.metrics.record_poll();
        match self.fetcher.poll().await {
            Ok(status) => {
                let outcome = if status.updates {
                    self.get_data().await;
                    self.metrics.record_refresh();
                    PollOutcome::Refreshed
                } else {
                    PollOutcome::Unchanged
                };
                if self.read(|state| state.communication_error) {
                    self.events.record("communication with backend restored");
                }
                self.commit(Mutation::SetCommunicationError(false));
                outcome
            }
            Err(err) => {
                self.metrics.record_failure();
                self.events.alert(&format!("HTTP polling error: {err}"));
                self.commit(Mutation::SetHttpError(err.to_http_error()));
                self.commit(Mutation::SetCommunicationError(true));
                PollOutcome::Failed
            }
        }
    }

    /// Initializes and hands the dashboard to a background poll loop.
    pub async fn start(self: Arc<Self>) -> PollHandle {
        self.initialize().await;
        PollHandle::spawn(self)
    }
}
