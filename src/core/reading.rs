//! Energy readings and timestamp parsing.

use crate::error::{AnalyticsError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Offset formats accepted after RFC 3339 fails. `%z` takes `+0100` and
/// `%:z` takes `+01:00`; minute precision is allowed with either.
const OFFSET_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive formats, tried in order. A trailing `Z` is stripped first.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A reading as it arrives on the wire, timestamp still unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    pub value: f64,
}

impl RawReading {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// A parsed energy reading.
///
/// The timestamp is the wall-clock time of the reading as written by the
/// producer. Offsets are honored only to pick that wall-clock time, so a
/// reading stamped `05:00+02:00` belongs to hour 5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Reading {
    /// Create a reading, rejecting negative or non-finite values.
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(AnalyticsError::Validation(format!(
                "reading at {timestamp} has non-finite value"
            )));
        }
        if value < 0.0 {
            return Err(AnalyticsError::Validation(format!(
                "reading at {timestamp} has negative value {value}"
            )));
        }
        Ok(Self { timestamp, value })
    }

    /// Parse a wire reading.
    pub fn parse(raw: &RawReading) -> Result<Self> {
        let timestamp = parse_timestamp(&raw.timestamp)?;
        Self::new(timestamp, raw.value)
    }
}

/// Parse an ISO-8601 style timestamp into its wall-clock date-time.
///
/// Accepts RFC 3339, offsets with or without a colon, `Z` suffixes, naive
/// date-times with `T` or space separators and optional seconds/fractions,
/// and bare dates (midnight).
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.naive_local());
        }
    }

    let naive = s.strip_suffix(&['Z', 'z'][..]).unwrap_or(s);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(AnalyticsError::Timestamp(format!(
        "invalid timestamp '{input}'"
    )))
}

/// Parse a batch of wire readings, preserving order.
///
/// Fails on the first reading that does not parse; an empty batch is a
/// validation error.
pub fn parse_readings(raw: &[RawReading]) -> Result<Vec<Reading>> {
    if raw.is_empty() {
        return Err(AnalyticsError::Validation(
            "no readings supplied".to_string(),
        ));
    }
    raw.iter().map(Reading::parse).collect()
}
