//! Hour-of-day and day-of-week consumption profiles.

use crate::core::Reading;
use crate::error::{AnalyticsError, Result};
use crate::features::DesignRow;
use crate::MIN_DATA_POINTS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Average consumption grouped by hour and by weekday.
///
/// Only groups that occur in the input have an entry. Weekdays use
/// Monday = 0 through Sunday = 6.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternProfile {
    pub hourly_average: BTreeMap<u32, f64>,
    pub daily_average: BTreeMap<u32, f64>,
}

impl PatternProfile {
    /// Hour with the highest average consumption.
    pub fn peak_hour(&self) -> Option<u32> {
        arg_max(&self.hourly_average)
    }

    /// Weekday with the highest average consumption.
    pub fn peak_day(&self) -> Option<u32> {
        arg_max(&self.daily_average)
    }
}

/// Build the pattern profile of at least ten readings.
pub fn analyze_patterns(readings: &[Reading]) -> Result<PatternProfile> {
    if readings.len() < MIN_DATA_POINTS {
        return Err(AnalyticsError::InsufficientData {
            needed: MIN_DATA_POINTS,
            got: readings.len(),
        });
    }

    let mut by_hour: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    let mut by_day: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for reading in readings {
        let row = DesignRow::from_timestamp(&reading.timestamp);
        accumulate(&mut by_hour, row.hour, reading.value);
        accumulate(&mut by_day, row.day_of_week, reading.value);
    }

    Ok(PatternProfile {
        hourly_average: averages(by_hour),
        daily_average: averages(by_day),
    })
}

fn accumulate(groups: &mut BTreeMap<u32, (f64, usize)>, key: u32, value: f64) {
    let entry = groups.entry(key).or_insert((0.0, 0));
    entry.0 += value;
    entry.1 += 1;
}

fn averages(groups: BTreeMap<u32, (f64, usize)>) -> BTreeMap<u32, f64> {
    groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

fn arg_max(averages: &BTreeMap<u32, f64>) -> Option<u32> {
    averages
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(key, _)| *key)
}
