//! Prediction form state: draft edits, submission lifecycle, and panel selection.
//!
//! Exactly one of idle, loading, result, or error is active at a time. Every
//! submission gets a fresh [`RequestToken`]; only the outcome carrying the
//! latest token is applied, older ones are dropped.

use client_core::PredictionError;
use shared::{FieldError, Passenger, PassengerField, Prediction};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub token: RequestToken,
    pub passenger: Passenger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRefusal {
    #[error("Please enter the passenger's name.")]
    MissingName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Result,
    Error,
}

impl FormPhase {
    pub fn label(self) -> &'static str {
        match self {
            FormPhase::Idle => "Ready",
            FormPhase::Loading => "Predicting",
            FormPhase::Result => "Result",
            FormPhase::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    Stale,
}

/// Which of the three outcome panels is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<'a> {
    Result(&'a Prediction),
    Error { message: &'a str, hint: String },
    Info,
}

#[derive(Debug, Clone)]
pub struct FormController {
    draft: Passenger,
    loading: bool,
    prediction: Option<Prediction>,
    error: Option<String>,
    issued: u64,
    backend_url: String,
}

impl FormController {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_draft(backend_url, Passenger::default())
    }

    pub fn with_draft(backend_url: impl Into<String>, draft: Passenger) -> Self {
        Self {
            draft,
            loading: false,
            prediction: None,
            error: None,
            issued: 0,
            backend_url: backend_url.into(),
        }
    }

    pub fn draft(&self) -> &Passenger {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn phase(&self) -> FormPhase {
        if self.loading {
            FormPhase::Loading
        } else if self.prediction.is_some() {
            FormPhase::Result
        } else if self.error.is_some() {
            FormPhase::Error
        } else {
            FormPhase::Idle
        }
    }

    pub fn apply_field_change(
        &mut self,
        field: PassengerField,
        raw: &str,
    ) -> Result<(), FieldError> {
        self.draft.apply_field(field, raw).inspect_err(|err| {
            tracing::debug!(field = %field, error = %err, "rejected form edit");
        })
    }

    /// Same as [`Self::apply_field_change`], addressed by wire name (`"Age"`, `"Fare"`, ...).
    #[cfg(test)]
    pub fn apply_named_field_change(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let field = name.parse::<PassengerField>()?;
        self.apply_field_change(field, raw)
    }

    /// Enters the loading state and hands out the payload to send.
    ///
    /// Previous prediction and error are cleared before the request is
    /// issued, so a stale result never renders next to a pending one.
    pub fn begin_submission(&mut self) -> Result<Submission, SubmitRefusal> {
        if !self.draft.has_name() {
            return Err(SubmitRefusal::MissingName);
        }

        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.prediction = None;

        let token = RequestToken(self.issued);
        tracing::debug!(token = token.value(), "prediction submission started");
        Ok(Submission {
            token,
            passenger: self.draft.clone(),
        })
    }

    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: Result<Prediction, PredictionError>,
    ) -> SettleOutcome {
        if !self.loading || token.value() != self.issued {
            tracing::debug!(
                token = token.value(),
                latest = self.issued,
                "discarding stale prediction outcome"
            );
            return SettleOutcome::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(prediction) => {
                self.prediction = Some(prediction);
            }
            Err(err) => {
                tracing::warn!(token = token.value(), error = %err, "prediction failed");
                self.error = Some(err.user_message());
            }
        }
        SettleOutcome::Applied
    }

    pub fn panel(&self) -> Panel<'_> {
        if let Some(prediction) = &self.prediction {
            Panel::Result(prediction)
        } else if let Some(message) = &self.error {
            Panel::Error {
                message,
                hint: format!(
                    "Make sure the backend server is running on {}",
                    self.backend_url
                ),
            }
        } else {
            Panel::Info
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
