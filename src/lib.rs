//! # energy-forecast
//!
//! Energy consumption forecasting from time-stamped readings.
//!
//! A linear model over calendar features (hour of day, day of week, day of
//! year) is fitted fresh for each history, driven over an hourly horizon,
//! and the resulting forecast is annotated with percentile peaks and summary
//! statistics. Hourly and weekday profiles of the raw history are available
//! without fitting a model.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, NaiveDate};
//! use energy_forecast::prelude::*;
//!
//! let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let history: Vec<RawReading> = (0..48)
//!     .map(|i| {
//!         let ts = base + Duration::hours(i);
//!         RawReading::new(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), 100.0 + (i % 24) as f64)
//!     })
//!     .collect();
//!
//! let set = extract(&history).unwrap();
//! let model = LinearModel::fit(&set).unwrap();
//! let predictions = generate(&model, 1, base + Duration::days(7)).unwrap();
//! let peaks = detect_peaks(&predictions, 90.0).unwrap();
//!
//! assert_eq!(predictions.len(), 24);
//! assert!(!peaks.is_empty());
//! ```

// Index loops mirror the matrix notation in the solver
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod features;
pub mod http;
pub mod models;
pub mod service;
pub mod utils;

pub use error::{AnalyticsError, Result};

/// Fewest readings accepted for fitting or pattern analysis.
pub const MIN_DATA_POINTS: usize = 10;

pub mod prelude {
    pub use crate::analysis::{
        analyze_patterns, summarize, summarize_with_total, PatternProfile, StatisticsSummary,
    };
    pub use crate::config::ForecastConfig;
    pub use crate::core::{Peak, Prediction, RawReading, Reading, Severity};
    pub use crate::detection::{detect_peaks, PeakConfig};
    pub use crate::error::{AnalyticsError, Result};
    pub use crate::features::{extract, DesignRow, TrainingSet};
    pub use crate::models::{generate, generate_from_now, CalendarModel, LinearModel};
}
