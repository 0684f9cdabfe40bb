//! Forecast output types: hourly predictions and peak annotations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single forecasted hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub timestamp: NaiveDateTime,
    /// Predicted consumption, never negative.
    pub value: f64,
}

impl Prediction {
    /// Create a prediction, clamping the value at zero.
    pub fn clamped(timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp,
            value: value.max(0.0),
        }
    }
}

/// How far a peak sits above the detection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// A prediction flagged as a consumption peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub severity: Severity,
}

/// Extract the values of a prediction sequence.
pub fn prediction_values(predictions: &[Prediction]) -> Vec<f64> {
    predictions.iter().map(|p| p.value).collect()
}
