//! Calculation logic for the Shift Engine.
//!
//! This module contains the pure functions that turn a shift's start and end
//! into pay-relevant metrics: worked duration, hours inside the night window,
//! and the flat expense allowance.

mod expense_allowance;
mod hours;
mod night_hours;
mod timestamp;
mod work_details;

pub use expense_allowance::calculate_expense_allowance;
pub use hours::{format_duration, hours_between, round_hours};
pub use night_hours::{HourSegment, HourSegments, calculate_night_hours, segment_by_hour};
pub use timestamp::parse_timestamp;
pub use work_details::WorkDetailCalculator;
