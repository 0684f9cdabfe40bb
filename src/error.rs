//! Error types for the energy-forecast library.

use thiserror::Error;

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while extracting features, fitting or summarizing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Malformed or out-of-range input that the caller can correct.
    #[error("validation error: {0}")]
    Validation(String),

    /// A reading timestamp could not be parsed.
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// An operation that requires values was handed none.
    #[error("empty input data")]
    EmptyInput,

    /// Computation error (e.g., non-finite values reaching the model).
    #[error("computation error: {0}")]
    Computation(String),
}

impl AnalyticsError {
    /// Whether the caller can fix the failure by changing its input.
    ///
    /// Timestamp failures are validation-class as far as the core is
    /// concerned; the HTTP layer still reports them as server errors.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AnalyticsError::Validation(_)
                | AnalyticsError::Timestamp(_)
                | AnalyticsError::InsufficientData { .. }
        )
    }
}
