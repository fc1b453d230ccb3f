use crate::session::Dashboard;
use crate::transport::Transport;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner of a running poll loop. Dropping the handle stops the loop.
pub struct PollHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawns a fixed-interval loop that polls, refreshes on updates, and
    /// keeps retrying through failures. At most one poll is in flight; the
    /// next one is scheduled only after the previous outcome is known.
    pub fn spawn<T: Transport>(dashboard: Arc<Dashboard<T>>) -> Self {
        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run(dashboard, stop_rx));
        Self { stop, task }
    }

    /// Signals the loop to stop; an in-flight poll is abandoned.
    pub fn cancel(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the loop and waits for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Err(err) = (&mut self.task).await {
            warn!("poll loop task failed: {err}");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop.send_replace(true);
    }
}

async fn run<T: Transport>(dashboard: Arc<Dashboard<T>>, mut stop: watch::Receiver<bool>) {
    let interval = dashboard.options().poll_interval;
    info!("poll loop started, interval {} ms", interval.as_millis());
    loop {
        tokio::select! {
            biased;
            _ = stopped(&mut stop) => break,
            _ = dashboard.poll_once() => {}
        }
        tokio::select! {
            biased;
            _ = stopped(&mut stop) => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    info!("poll loop stopped");
}

/// Resolves once a stop is requested or the handle is gone.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Endpoints;
    use crate::session::DashboardOptions;
    use crate::testing::MockTransport;
    use crate::transport::TransportError;
    use serde_json::json;
    use std::time::Duration;

    fn dashboard(transport: MockTransport) -> Arc<Dashboard<MockTransport>> {
        Arc::new(Dashboard::new(
            transport,
            Endpoints::current(),
            DashboardOptions {
                poll_interval: Duration::from_millis(1000),
                viewport_height: 900.0,
            },
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_never_sees_overlapping_polls() {
        let transport = MockTransport::new();
        transport.respond("/poll", json!({"updates": false}));
        transport.delay("/poll", Duration::from_millis(2000));
        let handle = PollHandle::spawn(dashboard(transport.clone()));

        tokio::time::sleep(Duration::from_millis(10_500)).await;

        assert_eq!(transport.peak_in_flight("/poll"), 1);
        // Each cycle is 2000ms in flight plus a 1000ms pause.
        assert_eq!(transport.calls("/poll"), 4);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn loop_keeps_retrying_after_failures() {
        let transport = MockTransport::new();
        transport.fail("/poll", TransportError::NoResponse("refused".into()));
        let dashboard = dashboard(transport.clone());
        let handle = PollHandle::spawn(dashboard.clone());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(transport.calls("/poll"), 4);
        let state = dashboard.state();
        assert!(state.communication_error);
        assert_eq!(state.modal_episodes, 1);

        transport.respond("/poll", json!({"updates": false}));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!dashboard.state().communication_error);
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_abandons_in_flight_poll() {
        let transport = MockTransport::new();
        transport.respond("/poll", json!({"updates": false}));
        transport.delay("/poll", Duration::from_secs(60));
        let handle = PollHandle::spawn(dashboard(transport.clone()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        let started = tokio::time::Instant::now();
        handle.shutdown().await;
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(transport.calls("/poll"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() {
        let transport = MockTransport::new();
        transport.respond("/poll", json!({"updates": false}));
        let handle = PollHandle::spawn(dashboard(transport.clone()));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(handle);
        let polls = transport.calls("/poll");
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(transport.calls("/poll"), polls);
    }

    #[tokio::test(start_paused = true)]
    async fn start_initializes_before_polling() {
        let transport = MockTransport::new();
        transport.respond("/data", json!({"time": [0], "a": [1]}));
        transport.respond("/get_options", json!({}));
        transport.respond("/poll", json!({"updates": true}));
        let dashboard = dashboard(transport.clone());

        let handle = dashboard.clone().start().await;
        assert_eq!(dashboard.state().num_plots(), 2);
        assert_eq!(transport.calls("/data"), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(transport.calls("/data"), 3);
        assert_eq!(dashboard.metrics().refreshes, 2);
        handle.shutdown().await;
    }
}
