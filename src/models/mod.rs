//! Regression model and forecast generation.

mod traits;

pub mod horizon;
pub mod linear;

pub use horizon::{default_start, generate, generate_from_now, DEFAULT_HORIZON_DAYS};
pub use linear::LinearModel;
pub use traits::CalendarModel;
