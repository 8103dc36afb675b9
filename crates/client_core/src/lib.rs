use async_trait::async_trait;
use reqwest::Client;
use shared::{Passenger, Prediction};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub mod settings;

pub use settings::{load_settings, resolve_settings, ClientSettings, SettingsError};

pub const REQUEST_FAILED_MESSAGE: &str = "Failed to get prediction";
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The endpoint answered with a non-2xx status. The body is not inspected.
    #[error("Failed to get prediction")]
    RequestFailure { status: u16 },
    #[error("{message}")]
    Transport { message: String },
    #[error("{message}")]
    Decode { message: String },
    #[error("An error occurred")]
    Unknown,
}

impl PredictionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The single string shown in the error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailure { .. } => REQUEST_FAILED_MESSAGE.to_string(),
            Self::Transport { message } | Self::Decode { message }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, passenger: &Passenger) -> Result<Prediction, PredictionError>;
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            http: Client::new(),
            endpoint: settings.predict_endpoint()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, passenger: &Passenger) -> Result<Prediction, PredictionError> {
        info!(
            endpoint = %self.endpoint,
            pclass = passenger.pclass.number(),
            "submitting prediction request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(passenger)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "prediction request failed to complete");
                PredictionError::transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "prediction endpoint returned error status");
            return Err(PredictionError::RequestFailure {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| PredictionError::transport(err.to_string()))?;
        let prediction: Prediction =
            serde_json::from_slice(&body).map_err(|err| PredictionError::Decode {
                message: format!("invalid prediction response payload: {err}"),
            })?;

        debug!(
            survived = prediction.survived,
            predicted_value = prediction.predicted_value,
            "prediction received"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
