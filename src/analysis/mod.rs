//! Descriptive analysis of readings and forecasts.

mod patterns;
mod summary;

pub use patterns::{analyze_patterns, PatternProfile};
pub use summary::{summarize, summarize_with_total, StatisticsSummary};
