//! Core data structures for energy readings and forecasts.

mod prediction;
mod reading;

pub use prediction::{prediction_values, Peak, Prediction, Severity};
pub use reading::{parse_readings, parse_timestamp, RawReading, Reading};
