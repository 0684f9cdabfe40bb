//! Detection utilities for forecasted consumption.
//!
//! Currently provides percentile-threshold peak detection.

mod peaks;

pub use peaks::{
    detect_peaks, detect_peaks_with, PeakConfig, PeakDetection, DEFAULT_HIGH_RATIO,
    DEFAULT_PERCENTILE,
};
