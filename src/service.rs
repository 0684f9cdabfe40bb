//! Request pipelines behind the HTTP endpoints.
//!
//! Each call builds its own training set and model, so concurrent requests
//! never share model state.

use crate::analysis::{analyze_patterns, summarize, summarize_with_total, StatisticsSummary};
use crate::config::ForecastConfig;
use crate::core::{parse_readings, prediction_values, Peak, Prediction, RawReading};
use crate::detection::detect_peaks;
use crate::error::{AnalyticsError, Result};
use crate::features::extract;
use crate::models::{default_start, generate, CalendarModel, LinearModel};
use crate::MIN_DATA_POINTS;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Body of a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub historical_data: Vec<RawReading>,
    #[serde(default)]
    pub prediction_days: Option<u32>,
    #[serde(default)]
    pub threshold_percentile: Option<f64>,
}

/// Body of a pattern analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub historical_data: Vec<RawReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictMetadata {
    pub historical_data_points: usize,
    pub prediction_days: u32,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub predictions: Vec<Prediction>,
    pub peaks: Vec<Peak>,
    pub statistics: StatisticsSummary,
    pub metadata: PredictMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub hourly_patterns: BTreeMap<u32, f64>,
    pub daily_patterns: BTreeMap<u32, f64>,
    pub overall_statistics: StatisticsSummary,
}

/// Decode a JSON request body; any shape mismatch is a validation error.
pub fn parse_request<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AnalyticsError::Validation(format!("invalid request body: {e}")))
}

/// Fit a model on the history and forecast from the day after `now`.
pub fn predict(request: &PredictRequest, now: NaiveDateTime) -> Result<PredictResponse> {
    let config =
        ForecastConfig::from_options(request.prediction_days, request.threshold_percentile)?;
    ensure_enough(&request.historical_data)?;

    let set = extract(&request.historical_data)?;
    let model = LinearModel::fit(&set)?;
    debug!(
        model = model.name(),
        coefficients = ?model.coefficients(),
        intercept = model.intercept(),
        rank = model.rank(),
        r_squared = model.r_squared(&set),
        "Fitted consumption model"
    );

    let predictions = generate(&model, config.prediction_days, default_start(now))?;
    let peaks = detect_peaks(&predictions, config.threshold_percentile)?;
    let statistics = summarize_with_total(&prediction_values(&predictions))?;

    info!(
        points = set.len(),
        days = config.prediction_days,
        peaks = peaks.len(),
        "Generated forecast"
    );

    Ok(PredictResponse {
        success: true,
        predictions,
        peaks,
        statistics,
        metadata: PredictMetadata {
            historical_data_points: request.historical_data.len(),
            prediction_days: config.prediction_days,
            generated_at: now,
        },
    })
}

/// Summarize the history and its hourly/weekday patterns.
pub fn analyze(request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
    ensure_enough(&request.historical_data)?;

    let readings = parse_readings(&request.historical_data)?;
    let profile = analyze_patterns(&readings)?;
    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    let overall_statistics = summarize(&values)?;

    info!(
        points = readings.len(),
        hours = profile.hourly_average.len(),
        weekdays = profile.daily_average.len(),
        "Analyzed consumption patterns"
    );

    Ok(AnalyzeResponse {
        success: true,
        hourly_patterns: profile.hourly_average,
        daily_patterns: profile.daily_average,
        overall_statistics,
    })
}

fn ensure_enough(data: &[RawReading]) -> Result<()> {
    if data.len() < MIN_DATA_POINTS {
        return Err(AnalyticsError::InsufficientData {
            needed: MIN_DATA_POINTS,
            got: data.len(),
        });
    }
    Ok(())
}
