//! Backend-to-UI events and error modeling for the desktop controller.

use client_core::PredictionError;
use shared::Prediction;

use crate::controller::reducer::RequestToken;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    PredictionSettled {
        token: RequestToken,
        outcome: Result<Prediction, PredictionError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Validation => "Response",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("decod")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("connect")
            || message_lower.contains("dns")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_prediction_error(err: &PredictionError) -> Self {
        let category = match err {
            PredictionError::RequestFailure { .. } => UiErrorCategory::Server,
            PredictionError::Transport { .. } => UiErrorCategory::Transport,
            PredictionError::Decode { .. } => UiErrorCategory::Validation,
            PredictionError::Unknown => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context: UiErrorContext::Submit,
            message: err.user_message(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status text, e.g. `Server error: Failed to get prediction`.
    pub fn status_line(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => {
                format!("Prediction worker unavailable: {}", self.message)
            }
            UiErrorContext::Submit => {
                format!("{} error: {}", err_label(self.category), self.message)
            }
        }
    }
}
