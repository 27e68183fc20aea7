//! Hour arithmetic shared by the calculators.
//!
//! Durations are carried as exact `Decimal` hours and only rounded when a
//! result leaves the engine.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Converts a millisecond count to exact hours.
pub(crate) fn millis_to_hours(millis: i64) -> Decimal {
    Decimal::new(millis, 0) / Decimal::new(MILLIS_PER_HOUR, 0)
}

/// Returns the unrounded hours from `start` to `end`.
///
/// Negative when `end` precedes `start`.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::hours_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 09:45:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(hours_between(start, end), Decimal::new(75, 2));
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    millis_to_hours((end - start).num_milliseconds())
}

/// Rounds hours to two decimal places, halves away from zero.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_hours(Decimal::new(12345, 4)), Decimal::new(123, 2)); // 1.2345 -> 1.23
/// assert_eq!(round_hours(Decimal::new(1235, 3)), Decimal::new(124, 2)); // 1.235 -> 1.24
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats hours as `"<h>h <m>m"`.
///
/// Minutes are rounded to the nearest whole minute and carry into the hour
/// at 60. Negative input renders as `0h 0m`.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::format_duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_duration(Decimal::new(825, 2)), "8h 15m");
/// assert_eq!(format_duration(Decimal::new(1999, 3)), "2h 0m");
/// ```
pub fn format_duration(hours: Decimal) -> String {
    if hours.is_sign_negative() {
        return "0h 0m".to_string();
    }

    let total_minutes = (hours * Decimal::new(60, 0))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
