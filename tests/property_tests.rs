//! Property-based tests for the forecasting pipeline.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated reading histories.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use energy_forecast::analysis::{analyze_patterns, summarize_with_total};
use energy_forecast::core::{Prediction, Reading, Severity};
use energy_forecast::detection::{detect_peaks_with, PeakConfig};
use energy_forecast::error::AnalyticsError;
use energy_forecast::features::{DesignRow, TrainingSet};
use energy_forecast::models::{generate, CalendarModel, LinearModel};
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Readings at the given hour offsets from the base timestamp.
fn make_readings(offsets: &[i64], values: &[f64]) -> Vec<Reading> {
    offsets
        .iter()
        .zip(values.iter())
        .map(|(&h, &v)| Reading::new(base() + Duration::hours(h), v).unwrap())
        .collect()
}

/// Strategy for a history of readings: hour offsets within one year and
/// non-negative values.
fn history_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Reading>> {
    (min_len..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(0i64..(24 * 365), len),
            prop::collection::vec(0.0..1000.0_f64, len),
        )
            .prop_map(|(offsets, values)| make_readings(&offsets, &values))
    })
}

/// Strategy for a history where every reading shares one hour of day.
fn single_hour_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Reading>> {
    (min_len..max_len, 0i64..24).prop_flat_map(|(len, hour)| {
        (
            prop::collection::vec(0i64..365, len),
            prop::collection::vec(0.0..1000.0_f64, len),
        )
            .prop_map(move |(days, values)| {
                let offsets: Vec<i64> = days.iter().map(|d| d * 24 + hour).collect();
                make_readings(&offsets, &values)
            })
    })
}

fn start_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(24 * 365 * 3)).prop_map(|h| base() + Duration::hours(h))
}

fn predictions_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<Prediction>> {
    prop::collection::vec(0.0..500.0_f64, min_len..max_len).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Prediction::clamped(base() + Duration::hours(i as i64), v))
            .collect()
    })
}

// =============================================================================
// Property: Fitting succeeds from ten points, including collinear features
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fit_succeeds_for_ten_or_more_points(readings in history_strategy(10, 200)) {
        let set = TrainingSet::from_readings(&readings).unwrap();
        let model = LinearModel::fit(&set).unwrap();
        let row = DesignRow { hour: 12, day_of_week: 3, day_of_year: 180 };
        prop_assert!(model.evaluate(&row).is_finite());
    }

    #[test]
    fn fit_succeeds_when_all_readings_share_an_hour(readings in single_hour_strategy(10, 100)) {
        let set = TrainingSet::from_readings(&readings).unwrap();
        let model = LinearModel::fit(&set).unwrap();
        prop_assert_eq!(model.coefficients()[0], 0.0);
        for row in set.rows() {
            prop_assert!(model.evaluate(row).is_finite());
        }
    }

    #[test]
    fn fit_and_analyze_reject_fewer_than_ten(readings in history_strategy(1, 10)) {
        let set = TrainingSet::from_readings(&readings).unwrap();
        let is_insufficient = matches!(
            LinearModel::fit(&set),
            Err(AnalyticsError::InsufficientData { needed: 10, .. })
        );
        prop_assert!(is_insufficient);
        let is_insufficient = matches!(
            analyze_patterns(&readings),
            Err(AnalyticsError::InsufficientData { needed: 10, .. })
        );
        prop_assert!(is_insufficient);
    }
}

// =============================================================================
// Property: Forecast shape and non-negativity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn forecast_has_24_hourly_points_per_day(
        readings in history_strategy(10, 120),
        days in 1u32..10,
        start in start_strategy()
    ) {
        let model = LinearModel::fit(&TrainingSet::from_readings(&readings).unwrap()).unwrap();
        let predictions = generate(&model, days, start).unwrap();

        prop_assert_eq!(predictions.len(), (days * 24) as usize);
        for pair in predictions.windows(2) {
            prop_assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn forecast_values_are_non_negative(
        readings in history_strategy(10, 120),
        days in 1u32..5,
        start in start_strategy()
    ) {
        let model = LinearModel::fit(&TrainingSet::from_readings(&readings).unwrap()).unwrap();
        let predictions = generate(&model, days, start).unwrap();
        for p in &predictions {
            prop_assert!(p.value >= 0.0, "negative prediction {}", p.value);
            prop_assert!(p.value.is_finite());
        }
    }
}

// =============================================================================
// Property: Peaks reach the threshold and severity follows the ratio
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn peaks_respect_threshold(
        predictions in predictions_strategy(1, 300),
        percentile in 0.0..=100.0_f64
    ) {
        let detection = detect_peaks_with(&predictions, &PeakConfig::percentile(percentile)).unwrap();

        prop_assert!(!detection.peaks.is_empty());
        for peak in &detection.peaks {
            prop_assert!(peak.value >= detection.threshold);
            let expected = if peak.value > detection.threshold * 1.1 {
                Severity::High
            } else {
                Severity::Medium
            };
            prop_assert_eq!(peak.severity, expected);
        }
        let flagged = predictions.iter().filter(|p| p.value >= detection.threshold).count();
        prop_assert_eq!(flagged, detection.peak_count());
    }
}

// =============================================================================
// Property: Summary statistics are ordered
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn summary_statistics_are_ordered(values in prop::collection::vec(0.0..1000.0_f64, 1..200)) {
        let summary = summarize_with_total(&values).unwrap();
        prop_assert!(summary.min <= summary.median && summary.median <= summary.max);
        prop_assert!(summary.min <= summary.mean + 1e-9 && summary.mean <= summary.max + 1e-9);
        prop_assert!(summary.std >= 0.0);
        let total = summary.total.unwrap();
        prop_assert!((total - summary.mean * values.len() as f64).abs() < 1e-6 * (1.0 + total));
    }
}
