//! Descriptive statistics over a value sequence.

use crate::error::{AnalyticsError, Result};
use crate::utils::stats::{maximum, mean, median, minimum, population_std_dev};
use serde::{Deserialize, Serialize};

/// Summary statistics of a value sequence.
///
/// `std` is the population standard deviation. `total` is only filled in
/// when requested and is omitted from JSON otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total: Option<f64>,
}

/// Summarize values without a total.
pub fn summarize(values: &[f64]) -> Result<StatisticsSummary> {
    if values.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }
    Ok(StatisticsSummary {
        mean: mean(values),
        median: median(values),
        std: population_std_dev(values),
        min: minimum(values),
        max: maximum(values),
        total: None,
    })
}

/// Summarize values including their sum.
pub fn summarize_with_total(values: &[f64]) -> Result<StatisticsSummary> {
    let mut summary = summarize(values)?;
    summary.total = Some(values.iter().sum());
    Ok(summary)
}
