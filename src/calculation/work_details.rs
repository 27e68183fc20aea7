//! Work detail calculation.
//!
//! Combines the duration, night hour and expense rules into the metrics
//! recorded for a shift. The calculator is pure: identical inputs always
//! yield identical outputs and nothing is read or written elsewhere.

use chrono::NaiveDateTime;

use crate::config::WorkRules;
use crate::error::{EngineError, EngineResult};
use crate::models::WorkDetails;

use super::expense_allowance::calculate_expense_allowance;
use super::hours::{hours_between, round_hours};
use super::night_hours::calculate_night_hours;
use super::timestamp::parse_timestamp;

/// Computes [`WorkDetails`] for start/end intervals under a set of rules.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::WorkDetailCalculator;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let calculator = WorkDetailCalculator::default();
/// let start = NaiveDateTime::parse_from_str("2026-01-15 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-16 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let details = calculator.compute(start, end).unwrap();
/// assert_eq!(details.duration_hours, Decimal::new(800, 2));
/// assert_eq!(details.night_hours, Decimal::new(800, 2));
/// assert_eq!(details.expense_euro, Decimal::ZERO); // exactly 8h does not qualify
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkDetailCalculator {
    rules: WorkRules,
}

impl WorkDetailCalculator {
    /// Creates a calculator applying `rules`.
    pub fn new(rules: WorkRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in effect.
    pub fn rules(&self) -> &WorkRules {
        &self.rules
    }

    /// Computes the metrics for `[start, end)`.
    ///
    /// Hours are rounded to two decimal places, halves away from zero. The
    /// expense allowance is decided on the unrounded duration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] if `end < start`. A zero
    /// length interval is valid and yields all zeros.
    pub fn compute(&self, start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<WorkDetails> {
        if end < start {
            return Err(EngineError::invalid_interval(format!(
                "end {} is before start {}",
                end, start
            )));
        }

        let duration = hours_between(start, end);
        let night = calculate_night_hours(start, end, &self.rules.night_window);
        let expense = calculate_expense_allowance(duration, &self.rules.expense);

        Ok(WorkDetails {
            duration_hours: round_hours(duration),
            night_hours: round_hours(night),
            expense_euro: expense,
        })
    }

    /// Like [`compute`](Self::compute), but yields [`WorkDetails::zero`] for
    /// a rejected interval.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::calculation::WorkDetailCalculator;
    /// use shift_engine::models::WorkDetails;
    /// use chrono::NaiveDateTime;
    ///
    /// let calculator = WorkDetailCalculator::default();
    /// let start = NaiveDateTime::parse_from_str("2026-01-15 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// assert_eq!(calculator.compute_or_zero(start, end), WorkDetails::zero());
    /// ```
    pub fn compute_or_zero(&self, start: NaiveDateTime, end: NaiveDateTime) -> WorkDetails {
        self.compute(start, end).unwrap_or_default()
    }

    /// Computes the metrics for textual timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] if either timestamp cannot be
    /// parsed or the interval is reversed.
    pub fn compute_str(&self, start: &str, end: &str) -> EngineResult<WorkDetails> {
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;
        self.compute(start, end)
    }
}
