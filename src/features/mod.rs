//! Feature extraction for the regression model.
//!
//! # Example
//!
//! ```
//! use energy_forecast::core::RawReading;
//! use energy_forecast::features::extract;
//!
//! let readings = vec![
//!     RawReading::new("2024-01-01T08:00:00", 420.0),
//!     RawReading::new("2024-01-01T09:00:00", 455.5),
//! ];
//! let set = extract(&readings).unwrap();
//! assert_eq!(set.rows()[1].hour, 9);
//! ```

pub mod calendar;

pub use calendar::{extract, DesignRow, TrainingSet};
