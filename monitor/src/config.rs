use anyhow::Context;
use dashclient::{BaseUrl, DashboardOptions, Endpoints, Environment};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub environment: Environment,
    pub endpoints: Endpoints,
    pub poll_interval_ms: u64,
    pub viewport_height: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            endpoints: Endpoints::current(),
            poll_interval_ms: 1000,
            viewport_height: 900.0,
        }
    }
}

impl MonitorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading monitor config {}", path_ref.display()))?;
        let config: MonitorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing monitor config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        dev: bool,
        host: String,
        port: u16,
        legacy_endpoints: bool,
        poll_interval_ms: u64,
        viewport_height: f64,
    ) -> Self {
        Self {
            environment: if dev {
                Environment::Development
            } else {
                Environment::Served { host, port }
            },
            endpoints: if legacy_endpoints {
                Endpoints::legacy()
            } else {
                Endpoints::current()
            },
            poll_interval_ms,
            viewport_height,
        }
    }

    pub fn base_url(&self) -> BaseUrl {
        BaseUrl::resolve(&self.environment)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            viewport_height: self.viewport_height,
        }
    }
}
