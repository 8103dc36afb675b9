use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const PREDICT_PATH: &str = "api/predict";

pub const SURVIVED_LABEL: &str = "Survived";
pub const DID_NOT_SURVIVE_LABEL: &str = "Did Not Survive";

/// Response body of `POST /api/predict`.
///
/// `survived` is the rounded regression score, so it can be negative.
/// Only `1` counts as survival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub survived: i64,
    pub predicted_value: f64,
}

impl Prediction {
    pub fn survived(&self) -> bool {
        self.survived == 1
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.survived() {
            SURVIVED_LABEL
        } else {
            DID_NOT_SURVIVE_LABEL
        }
    }

    /// `abs(predicted_value) * 100`, clamped to `[0, 100]`.
    pub fn confidence_percent(&self) -> f64 {
        let percent = self.predicted_value.abs() * 100.0;
        if percent.is_nan() {
            return 0.0;
        }
        percent.clamp(0.0, 100.0)
    }

    pub fn confidence_fraction(&self) -> f32 {
        (self.confidence_percent() / 100.0) as f32
    }

    pub fn confidence_readout(&self) -> String {
        format!("{:.1}%", self.confidence_percent())
    }
}
