//! Linear regression over calendar features.
//!
//! Fits `value ≈ w_hour·hour + w_dow·day_of_week + w_doy·day_of_year + b`
//! by ordinary least squares. Collinear or constant features never cause a
//! failure: they receive the minimum-norm share of the weight.

use crate::error::{AnalyticsError, Result};
use crate::features::{DesignRow, TrainingSet};
use crate::models::CalendarModel;
use crate::utils::ols::ols_fit;
use crate::MIN_DATA_POINTS;
use serde::Serialize;

/// A fitted linear model. Immutable; refit to incorporate new data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    hour_weight: f64,
    day_of_week_weight: f64,
    day_of_year_weight: f64,
    intercept: f64,
    rank: usize,
    n_observations: usize,
}

impl LinearModel {
    /// Fit a model to a training set of at least ten observations.
    pub fn fit(set: &TrainingSet) -> Result<Self> {
        if set.len() < MIN_DATA_POINTS {
            return Err(AnalyticsError::InsufficientData {
                needed: MIN_DATA_POINTS,
                got: set.len(),
            });
        }

        let [hours, days_of_week, days_of_year] = set.columns();
        let fit = ols_fit(set.targets(), &[&hours, &days_of_week, &days_of_year])?;

        Ok(Self {
            hour_weight: fit.coefficients[0],
            day_of_week_weight: fit.coefficients[1],
            day_of_year_weight: fit.coefficients[2],
            intercept: fit.intercept,
            rank: fit.rank,
            n_observations: set.len(),
        })
    }

    /// Weights in `[hour, day_of_week, day_of_year]` order.
    pub fn coefficients(&self) -> [f64; DesignRow::WIDTH] {
        [
            self.hour_weight,
            self.day_of_week_weight,
            self.day_of_year_weight,
        ]
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Numerical rank of the centered design matrix (0 to 3).
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of observations the model was fitted on.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// In-sample predictions for a training set.
    pub fn fitted_values(&self, set: &TrainingSet) -> Vec<f64> {
        set.rows().iter().map(|row| self.evaluate(row)).collect()
    }

    /// Coefficient of determination on a training set.
    ///
    /// Returns 1.0 for a constant target that the model reproduces exactly.
    pub fn r_squared(&self, set: &TrainingSet) -> f64 {
        let targets = set.targets();
        if targets.is_empty() {
            return f64::NAN;
        }
        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        let ss_tot: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
        let ss_res: f64 = targets
            .iter()
            .zip(self.fitted_values(set))
            .map(|(y, f)| (y - f).powi(2))
            .sum();

        if ss_tot < 1e-12 {
            return if ss_res < 1e-12 { 1.0 } else { 0.0 };
        }
        1.0 - ss_res / ss_tot
    }
}

impl CalendarModel for LinearModel {
    fn evaluate(&self, row: &DesignRow) -> f64 {
        let [hour, dow, doy] = row.to_array();
        self.intercept
            + self.hour_weight * hour
            + self.day_of_week_weight * dow
            + self.day_of_year_weight * doy
    }

    fn name(&self) -> &str {
        "LinearRegression"
    }
}
