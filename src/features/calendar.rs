//! Calendar features derived from reading timestamps.
//!
//! Each timestamp maps to three numeric features: hour of day, day of week
//! (Monday = 0 through Sunday = 6) and ordinal day of year (1 to 366).

use crate::core::{parse_readings, RawReading, Reading};
use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Calendar features of a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignRow {
    /// Hour of day, 0 to 23.
    pub hour: u32,
    /// Day of week, Monday = 0 to Sunday = 6.
    pub day_of_week: u32,
    /// Day of year, 1 to 366.
    pub day_of_year: u32,
}

impl DesignRow {
    /// Number of features in a row.
    pub const WIDTH: usize = 3;

    /// Derive the features of a timestamp.
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        Self {
            hour: timestamp.hour(),
            day_of_week: timestamp.weekday().num_days_from_monday(),
            day_of_year: timestamp.ordinal(),
        }
    }

    /// Features as floats, in `[hour, day_of_week, day_of_year]` order.
    pub fn to_array(&self) -> [f64; Self::WIDTH] {
        [
            self.hour as f64,
            self.day_of_week as f64,
            self.day_of_year as f64,
        ]
    }
}

/// Design matrix and target vector, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    rows: Vec<DesignRow>,
    targets: Vec<f64>,
}

impl TrainingSet {
    /// Build a training set from parsed readings.
    pub fn from_readings(readings: &[Reading]) -> Result<Self> {
        if readings.is_empty() {
            return Err(AnalyticsError::Validation(
                "no readings supplied".to_string(),
            ));
        }
        let rows = readings
            .iter()
            .map(|r| DesignRow::from_timestamp(&r.timestamp))
            .collect();
        let targets = readings.iter().map(|r| r.value).collect();
        Ok(Self { rows, targets })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DesignRow] {
        &self.rows
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Feature columns in `[hour, day_of_week, day_of_year]` order.
    pub fn columns(&self) -> [Vec<f64>; DesignRow::WIDTH] {
        [
            self.rows.iter().map(|r| r.hour as f64).collect(),
            self.rows.iter().map(|r| r.day_of_week as f64).collect(),
            self.rows.iter().map(|r| r.day_of_year as f64).collect(),
        ]
    }
}

/// Parse wire readings and derive their training set.
pub fn extract(readings: &[RawReading]) -> Result<TrainingSet> {
    let parsed = parse_readings(readings)?;
    TrainingSet::from_readings(&parsed)
}
