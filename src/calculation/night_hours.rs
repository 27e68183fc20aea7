//! Night hour accounting.
//!
//! A shift is walked in segments aligned to top-of-hour boundaries. Each
//! segment is attributed to the hour-of-day it starts in, which is how
//! partial hours at either end of a shift and hours across midnight are
//! apportioned to the night window.

use chrono::{Duration, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::NightWindow;

use super::hours::millis_to_hours;

/// A piece of a shift contained within a single clock hour.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::HourSegment;
/// use chrono::NaiveDateTime;
///
/// let segment = HourSegment {
///     start_time: NaiveDateTime::parse_from_str("2026-01-15 21:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end_time: NaiveDateTime::parse_from_str("2026-01-15 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     hour_of_day: 21,
/// };
/// assert_eq!(segment.millis(), 30 * 60 * 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSegment {
    /// Start of the segment.
    pub start_time: NaiveDateTime,
    /// End of the segment (next top of hour, or the shift end).
    pub end_time: NaiveDateTime,
    /// The hour-of-day the segment starts in.
    pub hour_of_day: u32,
}

impl HourSegment {
    /// Length of the segment in milliseconds.
    pub fn millis(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

/// Iterator over the hour-aligned segments of an interval.
///
/// Bounded by the interval's elapsed hour count plus two, so malformed input
/// can never loop forever.
#[derive(Debug, Clone)]
pub struct HourSegments {
    cursor: NaiveDateTime,
    end: NaiveDateTime,
    remaining: i64,
}

impl Iterator for HourSegments {
    type Item = HourSegment;

    fn next(&mut self) -> Option<HourSegment> {
        if self.cursor >= self.end {
            return None;
        }
        if self.remaining <= 0 {
            warn!(
                cursor = %self.cursor,
                end = %self.end,
                "Hour segmentation hit its iteration cap"
            );
            return None;
        }
        self.remaining -= 1;

        let start_time = self.cursor;
        let next_hour = top_of_hour(start_time) + Duration::hours(1);
        let end_time = next_hour.min(self.end);
        self.cursor = end_time;

        Some(HourSegment {
            start_time,
            end_time,
            hour_of_day: start_time.hour(),
        })
    }
}

fn top_of_hour(at: NaiveDateTime) -> NaiveDateTime {
    let into_hour = Duration::seconds(i64::from(at.minute() * 60 + at.second()))
        + Duration::nanoseconds(i64::from(at.nanosecond()));
    at - into_hour
}

/// Splits `[start, end)` at every top-of-hour boundary.
///
/// Returns an empty iterator when `end <= start`.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::segment_by_hour;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 21:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 23:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let hours: Vec<u32> = segment_by_hour(start, end).map(|s| s.hour_of_day).collect();
/// assert_eq!(hours, vec![21, 22, 23]);
/// ```
pub fn segment_by_hour(start: NaiveDateTime, end: NaiveDateTime) -> HourSegments {
    let remaining = if end > start {
        (end - start).num_hours() + 2
    } else {
        0
    };

    HourSegments {
        cursor: start,
        end,
        remaining,
    }
}

/// Returns the unrounded hours of `[start, end)` that fall in `window`.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::calculate_night_hours;
/// use shift_engine::config::NightWindow;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 21:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 23:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let night = calculate_night_hours(start, end, &NightWindow::default());
/// assert_eq!(night, Decimal::new(15, 1)); // 1.5 hours
/// ```
pub fn calculate_night_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window: &NightWindow,
) -> Decimal {
    let night_millis: i64 = segment_by_hour(start, end)
        .filter(|segment| window.contains(segment.hour_of_day))
        .map(|segment| segment.millis())
        .sum();

    millis_to_hours(night_millis)
}
