use log::{info, warn};

/// Records user-facing communication events under one log target.
pub struct EventLog {
    target: &'static str,
}

impl EventLog {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn alert(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new("dashboard")
    }
}
