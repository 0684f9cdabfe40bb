//! Peak detection over forecasted consumption.
//!
//! A prediction is a peak when its value reaches the configured percentile
//! of all predicted values. Peaks more than `high_ratio` times the threshold
//! are marked high severity.

use crate::core::{prediction_values, Peak, Prediction, Severity};
use crate::error::{AnalyticsError, Result};
use crate::utils::stats::percentile;

/// Default percentile for the peak threshold.
pub const DEFAULT_PERCENTILE: f64 = 90.0;

/// Default multiplier of the threshold above which a peak is high severity.
pub const DEFAULT_HIGH_RATIO: f64 = 1.1;

/// Configuration for peak detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakConfig {
    /// Percentile (0 to 100) of predicted values used as threshold.
    pub percentile: f64,
    /// Peaks above `threshold * high_ratio` are high severity.
    pub high_ratio: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            high_ratio: DEFAULT_HIGH_RATIO,
        }
    }
}

impl PeakConfig {
    /// Use the given percentile with the default severity ratio.
    pub fn percentile(percentile: f64) -> Self {
        Self {
            percentile,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.percentile.is_finite() || !(0.0..=100.0).contains(&self.percentile) {
            return Err(AnalyticsError::Validation(format!(
                "percentile must be within [0, 100], got {}",
                self.percentile
            )));
        }
        if !self.high_ratio.is_finite() || self.high_ratio < 1.0 {
            return Err(AnalyticsError::Validation(format!(
                "high severity ratio must be at least 1, got {}",
                self.high_ratio
            )));
        }
        Ok(())
    }
}

/// Result of peak detection.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakDetection {
    /// Detected peaks in prediction order.
    pub peaks: Vec<Peak>,
    /// Threshold value the peaks reach.
    pub threshold: f64,
    /// Number of predictions examined.
    pub examined: usize,
}

impl PeakDetection {
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    pub fn high_count(&self) -> usize {
        self.peaks
            .iter()
            .filter(|p| p.severity == Severity::High)
            .count()
    }

    /// Share of predictions flagged, in percent.
    pub fn peak_percentage(&self) -> f64 {
        if self.examined == 0 {
            0.0
        } else {
            100.0 * self.peaks.len() as f64 / self.examined as f64
        }
    }
}

/// Detect peaks with the given percentile threshold.
pub fn detect_peaks(predictions: &[Prediction], percentile: f64) -> Result<Vec<Peak>> {
    detect_peaks_with(predictions, &PeakConfig::percentile(percentile)).map(|d| d.peaks)
}

/// Detect peaks with a full configuration.
pub fn detect_peaks_with(predictions: &[Prediction], config: &PeakConfig) -> Result<PeakDetection> {
    if predictions.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }
    config.validate()?;

    let values = prediction_values(predictions);
    let threshold = percentile(&values, config.percentile);
    let high_above = threshold * config.high_ratio;

    let peaks = predictions
        .iter()
        .filter(|p| p.value >= threshold)
        .map(|p| Peak {
            timestamp: p.timestamp,
            value: p.value,
            severity: if p.value > high_above {
                Severity::High
            } else {
                Severity::Medium
            },
        })
        .collect();

    Ok(PeakDetection {
        peaks,
        threshold,
        examined: predictions.len(),
    })
}
