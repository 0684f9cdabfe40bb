//! Numerical utilities shared by the models and summaries.

pub mod ols;
pub mod stats;

pub use ols::{ols_fit, OlsFit};
pub use stats::{maximum, mean, median, minimum, percentile, population_std_dev};
