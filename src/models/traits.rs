//! Model trait shared by everything the forecast generator can drive.

use crate::features::DesignRow;

/// A fitted model over calendar features.
///
/// Implementations are immutable once fitted, so one instance can be read
/// from any number of threads without locking. Each fit produces a new
/// value rather than updating an existing one.
pub trait CalendarModel: Send + Sync {
    /// Evaluate the model on a single row. Pure; may return negative values.
    fn evaluate(&self, row: &DesignRow) -> f64;

    /// Get the model name.
    fn name(&self) -> &str;
}
