use crate::endpoints::Endpoints;
use crate::transport::{Transport, TransportError};
use dashcore::schema::{parse_model, DataPayload, OptionsPayload, PollStatus};
use dashcore::store::HttpError;
use dashcore::{ModelData, SchemaError, SchemaResult};
use serde_json::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl FetchError {
    /// Modal content describing this failure.
    pub fn to_http_error(&self) -> HttpError {
        match self {
            FetchError::Transport(TransportError::NoResponse(detail)) => {
                HttpError::no_response(detail)
            }
            FetchError::Transport(TransportError::Status { code, reason }) => {
                HttpError::server_status(*code, reason)
            }
            FetchError::Schema(SchemaError::BackendReported { code, text, .. }) => {
                HttpError::server_status(*code, text)
            }
            other => HttpError::unexpected_payload(&other.to_string()),
        }
    }
}

/// Results of one snapshot fetch; every part succeeds or fails on its own.
#[derive(Debug)]
pub struct FetchedSnapshot {
    pub data: Result<DataPayload, FetchError>,
    pub options: Result<OptionsPayload, FetchError>,
    /// Only present when the endpoints name a standalone model endpoint.
    pub model: Option<Result<ModelData, FetchError>>,
}

/// Issues and validates the snapshot and poll requests.
pub struct SnapshotFetcher<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> SnapshotFetcher<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get<R>(
        &self,
        path: &str,
        parse: fn(&str, &Value) -> SchemaResult<R>,
    ) -> Result<R, FetchError> {
        let value = self.transport.get_json(path).await?;
        Ok(parse(path, &value)?)
    }

    /// Requests data, options and (if separate) model concurrently and
    /// waits for all of them.
    pub async fn fetch_snapshot(&self) -> FetchedSnapshot {
        let data = self.get(&self.endpoints.data, DataPayload::parse);
        let options = self.get(&self.endpoints.options, OptionsPayload::parse);
        let model = async {
            match &self.endpoints.model {
                Some(path) => Some(self.get(path, parse_model).await),
                None => None,
            }
        };

        let (data, options, model) = tokio::join!(data, options, model);
        FetchedSnapshot {
            data,
            options,
            model,
        }
    }

    pub async fn poll(&self) -> Result<PollStatus, FetchError> {
        self.get(&self.endpoints.poll, PollStatus::parse).await
    }
}
