use std::sync::Mutex;

/// Poll loop counters.
pub struct PollMetrics {
    inner: Mutex<PollCounters>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollCounters {
    pub polls: usize,
    pub failures: usize,
    pub refreshes: usize,
}

impl PollMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PollCounters::default()),
        }
    }

    pub fn record_poll(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.polls += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failures += 1;
        }
    }

    pub fn record_refresh(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.refreshes += 1;
        }
    }

    pub fn snapshot(&self) -> PollCounters {
        self.inner
            .lock()
            .map(|counters| *counters)
            .unwrap_or_default()
    }
}

impl Default for PollMetrics {
    fn default() -> Self {
        Self::new()
    }
}
