use std::future::Future;

use nation_proto::{HistoryPoint, SimulationSnapshot};
use thiserror::Error;

/// The single user-facing failure category. Transport errors, bad
/// status codes and malformed payloads all collapse into this banner
/// text; the distinction only matters in the logs.
pub const SERVICE_UNAVAILABLE: &str = "cannot reach simulation service";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    pub fn user_message(&self) -> &'static str {
        SERVICE_UNAVAILABLE
    }
}

/// Fetch/advance contract of the remote simulation service. The
/// synchronizer is generic over this so tests can script responses
/// without a network.
pub trait SimulationApi {
    fn fetch_state(&self) -> impl Future<Output = Result<SimulationSnapshot, ClientError>> + Send;
    fn fetch_history(&self) -> impl Future<Output = Result<Vec<HistoryPoint>, ClientError>> + Send;
    fn advance(&self) -> impl Future<Output = Result<SimulationSnapshot, ClientError>> + Send;
}

/// HTTP implementation against the service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpSimulationApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSimulationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.text().await?)
    }
}

impl SimulationApi for HttpSimulationApi {
    async fn fetch_state(&self) -> Result<SimulationSnapshot, ClientError> {
        let body = self.get_text("/api/simulation/state").await?;
        nation_proto::decode_snapshot_json(&body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryPoint>, ClientError> {
        let body = self.get_text("/api/simulation/history").await?;
        nation_proto::decode_history_json(&body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))
    }

    async fn advance(&self) -> Result<SimulationSnapshot, ClientError> {
        let url = format!("{}/api/simulation/tick", self.base_url);
        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        let body = response.text().await?;
        nation_proto::decode_snapshot_json(&body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))
    }
}
