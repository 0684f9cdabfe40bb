//! Configuration for forecasting requests and the HTTP server.

use crate::detection::DEFAULT_PERCENTILE;
use crate::error::{AnalyticsError, Result};
use crate::models::DEFAULT_HORIZON_DAYS;
use std::num::ParseIntError;
use thiserror::Error;

/// Longest forecast horizon a request may ask for.
pub const MAX_PREDICTION_DAYS: u32 = 365;

/// Default listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Forecast parameters with their documented defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Days of hourly predictions to produce (default 7).
    pub prediction_days: u32,
    /// Percentile of predicted values used as the peak threshold (default 90).
    pub threshold_percentile: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            prediction_days: DEFAULT_HORIZON_DAYS,
            threshold_percentile: DEFAULT_PERCENTILE,
        }
    }
}

impl ForecastConfig {
    /// Fill unset fields with defaults and validate the result.
    pub fn from_options(
        prediction_days: Option<u32>,
        threshold_percentile: Option<f64>,
    ) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            prediction_days: prediction_days.unwrap_or(defaults.prediction_days),
            threshold_percentile: threshold_percentile.unwrap_or(defaults.threshold_percentile),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PREDICTION_DAYS).contains(&self.prediction_days) {
            return Err(AnalyticsError::Validation(format!(
                "prediction_days must be between 1 and {MAX_PREDICTION_DAYS}, got {}",
                self.prediction_days
            )));
        }
        if !self.threshold_percentile.is_finite()
            || !(0.0..=100.0).contains(&self.threshold_percentile)
        {
            return Err(AnalyticsError::Validation(format!(
                "threshold_percentile must be within [0, 100], got {}",
                self.threshold_percentile
            )));
        }
        Ok(())
    }
}

/// Errors loading the server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Listening socket settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read the port from the `PORT` environment variable.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_port_var(std::env::var("PORT").ok())
    }

    /// Build from an optional raw `PORT` value; blank means default.
    pub fn from_port_var(port: Option<String>) -> std::result::Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = port {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.port = trimmed
                    .parse()
                    .map_err(|source| ConfigError::InvalidPort {
                        value: value.clone(),
                        source,
                    })?;
            }
        }
        Ok(config)
    }

    /// `address:port` string for binding.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_defaults() {
        let config = ForecastConfig::from_options(None, None).unwrap();
        assert_eq!(config.prediction_days, 7);
        assert_eq!(config.threshold_percentile, 90.0);
    }

    #[test]
    fn forecast_overrides_are_validated() {
        let config = ForecastConfig::from_options(Some(14), Some(75.0)).unwrap();
        assert_eq!(config.prediction_days, 14);
        assert_eq!(config.threshold_percentile, 75.0);

        assert!(ForecastConfig::from_options(Some(0), None).is_err());
        assert!(ForecastConfig::from_options(Some(MAX_PREDICTION_DAYS + 1), None).is_err());
        assert!(ForecastConfig::from_options(None, Some(-1.0)).is_err());
        assert!(ForecastConfig::from_options(None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn server_defaults_without_port() {
        let config = ServerConfig::from_port_var(None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_address(), "0.0.0.0:5000");

        let config = ServerConfig::from_port_var(Some("  ".to_owned())).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn server_reads_port() {
        let config = ServerConfig::from_port_var(Some("8080".to_owned())).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn server_rejects_bad_port() {
        let err = ServerConfig::from_port_var(Some("http".to_owned())).unwrap_err();
        assert!(err.to_string().starts_with("invalid PORT value 'http'"));
        assert!(ServerConfig::from_port_var(Some("70000".to_owned())).is_err());
    }
}
