//! Hourly forecast generation over a horizon of whole days.

use crate::core::Prediction;
use crate::error::{AnalyticsError, Result};
use crate::features::DesignRow;
use crate::models::CalendarModel;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime, Timelike};

/// Default number of days to forecast.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Hours forecast per horizon day.
pub const HOURS_PER_DAY: u32 = 24;

/// Generate `horizon_days * 24` hourly predictions.
///
/// Day `d` of the horizon is the calendar date of `start + d days`; each of
/// its hours 0 to 23 gets one prediction at `hh:00:00`, clamped at zero.
/// Output is in strictly increasing time order.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use energy_forecast::features::DesignRow;
/// use energy_forecast::models::{generate, CalendarModel};
///
/// struct Flat;
/// impl CalendarModel for Flat {
///     fn evaluate(&self, _row: &DesignRow) -> f64 { 42.0 }
///     fn name(&self) -> &str { "Flat" }
/// }
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let predictions = generate(&Flat, 2, start).unwrap();
/// assert_eq!(predictions.len(), 48);
/// assert_eq!(predictions[0].value, 42.0);
/// ```
pub fn generate<M: CalendarModel + ?Sized>(
    model: &M,
    horizon_days: u32,
    start: NaiveDateTime,
) -> Result<Vec<Prediction>> {
    if horizon_days == 0 {
        return Err(AnalyticsError::Validation(
            "forecast horizon must be at least 1 day".to_string(),
        ));
    }

    let last_day = Duration::try_days(i64::from(horizon_days) - 1)
        .and_then(|offset| start.checked_add_signed(offset));
    if last_day.is_none() {
        return Err(AnalyticsError::Validation(format!(
            "forecast horizon of {horizon_days} days exceeds the supported date range"
        )));
    }

    let mut predictions = Vec::with_capacity(horizon_days as usize * HOURS_PER_DAY as usize);

    for day in 0..horizon_days {
        let date = (start + Duration::days(i64::from(day))).date();
        for hour in 0..HOURS_PER_DAY {
            let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
                continue;
            };
            let timestamp = date.and_time(time);
            let row = DesignRow::from_timestamp(&timestamp);
            predictions.push(Prediction::clamped(timestamp, model.evaluate(&row)));
        }
    }

    Ok(predictions)
}

/// Generate predictions starting one day after the current local time.
pub fn generate_from_now<M: CalendarModel + ?Sized>(
    model: &M,
    horizon_days: u32,
) -> Result<Vec<Prediction>> {
    generate(model, horizon_days, default_start(Local::now().naive_local()))
}

/// One calendar day after `now`, truncated to the start of the hour.
pub fn default_start(now: NaiveDateTime) -> NaiveDateTime {
    let next = now + Duration::days(1);
    next.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    struct HourRamp {
        base: f64,
        slope: f64,
    }

    impl CalendarModel for HourRamp {
        fn evaluate(&self, row: &DesignRow) -> f64 {
            self.base + self.slope * row.hour as f64
        }

        fn name(&self) -> &str {
            "HourRamp"
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 27)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn produces_24_predictions_per_day() {
        let model = HourRamp {
            base: 1.0,
            slope: 1.0,
        };
        for days in [1, 3, 7] {
            let predictions = generate(&model, days, start()).unwrap();
            assert_eq!(predictions.len(), (days * 24) as usize);
        }
    }

    #[test]
    fn timestamps_start_at_midnight_of_start_date() {
        let model = HourRamp {
            base: 1.0,
            slope: 1.0,
        };
        let predictions = generate(&model, 3, start()).unwrap();

        let first = predictions[0].timestamp;
        assert_eq!(first.date(), start().date());
        assert_eq!(first.time(), NaiveTime::MIN);

        for pair in predictions.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }

        // Crosses the leap day
        assert_eq!(predictions[24 * 2].timestamp.date().day(), 29);
        assert_eq!(predictions[24 * 2].timestamp.ordinal(), 60);
    }

    #[test]
    fn clamps_negative_model_output() {
        let model = HourRamp {
            base: -10.0,
            slope: 1.0,
        };
        let predictions = generate(&model, 1, start()).unwrap();
        assert!(predictions.iter().all(|p| p.value >= 0.0));
        assert_eq!(predictions[0].value, 0.0);
        assert_eq!(predictions[23].value, 13.0);
    }

    #[test]
    fn rejects_zero_horizon() {
        let model = HourRamp {
            base: 1.0,
            slope: 0.0,
        };
        assert!(matches!(
            generate(&model, 0, start()),
            Err(AnalyticsError::Validation(_))
        ));
    }

    #[test]
    fn rejects_horizon_past_the_calendar_range() {
        let model = HourRamp {
            base: 1.0,
            slope: 0.0,
        };
        let err = generate(&model, u32::MAX, start()).unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));

        let near_end = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap() - Duration::days(1);
        assert_eq!(generate(&model, 2, near_end).unwrap().len(), 48);
        assert!(matches!(
            generate(&model, 3, near_end),
            Err(AnalyticsError::Validation(_))
        ));
    }

    #[test]
    fn is_deterministic() {
        let model = HourRamp {
            base: 3.0,
            slope: 2.0,
        };
        let a = generate(&model, 2, start()).unwrap();
        let b = generate(&model, 2, start()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_start_is_next_day_on_the_hour() {
        let now = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 500)
            .unwrap();
        let s = default_start(now);
        assert_eq!(s.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(s.hour(), 23);
        assert_eq!(s.minute(), 0);
        assert_eq!(s.second(), 0);
        assert_eq!(s.nanosecond(), 0);
    }

    #[test]
    fn works_through_trait_objects() {
        let model: Box<dyn CalendarModel> = Box::new(HourRamp {
            base: 5.0,
            slope: 0.0,
        });
        let predictions = generate(model.as_ref(), 1, start()).unwrap();
        assert!(predictions.iter().all(|p| p.value == 5.0));
    }
}
