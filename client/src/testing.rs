//! Scripted in-memory transport for tests.

use crate::transport::{Transport, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<String, Result<Value, TransportError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: Mutex<HashMap<String, usize>>,
    peak_in_flight: Mutex<HashMap<String, usize>>,
    concurrent: AtomicUsize,
    max_concurrent: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.inner.routes.lock().unwrap().insert(path.into(), Ok(body));
    }

    pub fn fail(&self, path: &str, error: TransportError) {
        self.inner.routes.lock().unwrap().insert(path.into(), Err(error));
    }

    pub fn delay(&self, path: &str, delay: Duration) {
        self.inner.delays.lock().unwrap().insert(path.into(), delay);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.inner.calls.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    /// Highest number of simultaneous requests seen for `path`.
    pub fn peak_in_flight(&self, path: &str) -> usize {
        self.inner
            .peak_in_flight
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of simultaneous requests seen across all paths.
    pub fn max_concurrent(&self) -> usize {
        self.inner.max_concurrent.load(Ordering::SeqCst)
    }
}

struct InFlight {
    inner: Arc<Inner>,
    path: String,
}

impl InFlight {
    fn enter(inner: Arc<Inner>, path: String) -> Self {
        *inner.calls.lock().unwrap().entry(path.clone()).or_default() += 1;
        let current = {
            let mut in_flight = inner.in_flight.lock().unwrap();
            let count = in_flight.entry(path.clone()).or_default();
            *count += 1;
            *count
        };
        let mut peak = inner.peak_in_flight.lock().unwrap();
        let entry = peak.entry(path.clone()).or_default();
        *entry = (*entry).max(current);
        drop(peak);

        let concurrent = inner.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        inner.max_concurrent.fetch_max(concurrent, Ordering::SeqCst);
        Self { inner, path }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(count) = self.inner.in_flight.lock().unwrap().get_mut(&self.path) {
            *count -= 1;
        }
        self.inner.concurrent.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Transport for MockTransport {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, TransportError>> + Send {
        let inner = self.inner.clone();
        let path = path.to_string();
        async move {
            let _guard = InFlight::enter(inner.clone(), path.clone());
            let delay = inner.delays.lock().unwrap().get(&path).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let response = inner.routes.lock().unwrap().get(&path).cloned();
            response.unwrap_or_else(|| Err(TransportError::NoResponse(format!("no route for {path}"))))
        }
    }
}
