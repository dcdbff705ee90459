use crate::form::Measurements;
use iris_api::{HealthResponse, PredictionResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8100";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    /// The service could not be reached at all
    #[error("Could not connect to the prediction service at {url}: {message}")]
    Connection { url: String, message: String },

    /// The service answered with a non-success status
    #[error("Prediction service returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Timeouts, undecodable bodies and anything else
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(
        &self,
        measurements: &Measurements,
    ) -> Result<PredictionResponse, ClientError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!("POST {} with {:?}", url, measurements.features());

        let response = self
            .client
            .post(&url)
            .json(&measurements.to_request())
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ClientError::Unexpected(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            message: error_message(&text),
        })
    }

    fn request_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::Connection {
                url: self.base_url.clone(),
                message: err.to_string(),
            }
        } else {
            ClientError::Unexpected(err.to_string())
        }
    }
}

/// Pull `error.message` out of the service's error envelope, or fall back to
/// the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
