use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

/// Backend address used by development builds.
pub const DEV_BASE_URL: &str = "http://localhost:8050";

/// Where the dashboard is running, which decides the backend it talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Environment {
    Development,
    /// Served by the backend itself at this host and port.
    Served { host: String, port: u16 },
}

/// Backend root every endpoint path is joined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn resolve(environment: &Environment) -> Self {
        match environment {
            Environment::Development => Self(DEV_BASE_URL.to_string()),
            Environment::Served { host, port } => Self(format!("http://{host}:{port}")),
        }
    }

    /// `get_options` and `/get_options` name the same endpoint.
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response at all: refused, unreachable, reset.
    #[error("no response from backend: {0}")]
    NoResponse(String),
    #[error("backend returned status {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// GET-only access to the backend.
pub trait Transport: Send + Sync + 'static {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpTransport {
    pub fn new(base: BaseUrl) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, TransportError>> + Send {
        let url = self.base.join(path);
        let request = self.client.get(url.clone());
        async move {
            debug!("GET {url}");
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::NoResponse(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                });
            }
            response
                .json::<Value>()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))
        }
    }
}
